use crate::errors::StoreError;
use crate::models::{AppData, NewTask, Task};

impl AppData {
    /// Appends a new open task. Input checks belong to the caller.
    pub fn add_task(mut self, id: String, new: NewTask) -> (Self, Task) {
        let task = Task {
            id,
            title: new.title,
            description: new.description,
            team: new.team,
            due_date: new.due_date,
            time: new.time,
            is_completed: false,
            is_recurring: new.is_recurring,
            recurring_days: new.recurring_days,
            recurring_end_date: new.recurring_end_date,
            image_url: new.image_url,
            added_by: new.added_by,
            notes: new.notes,
        };
        self.tasks.push(task.clone());
        (self, task)
    }

    pub fn toggle_completion(self, task_id: &str) -> Result<(Self, Task), StoreError> {
        self.update_task(task_id, |task| task.is_completed = !task.is_completed)
    }

    pub fn update_notes(self, task_id: &str, notes: String) -> Result<(Self, Task), StoreError> {
        self.update_task(task_id, |task| task.notes = Some(notes))
    }

    pub fn attach_image(self, task_id: &str, image_url: String) -> Result<(Self, Task), StoreError> {
        self.update_task(task_id, |task| task.image_url = Some(image_url))
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    fn update_task(
        mut self,
        task_id: &str,
        apply: impl FnOnce(&mut Task),
    ) -> Result<(Self, Task), StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))?;
        apply(task);
        let updated = task.clone();
        Ok((self, updated))
    }
}
