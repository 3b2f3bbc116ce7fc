use tokio::sync::mpsc;

use crate::events::UiEvent;

/// Sender half of the runtime inbox; handlers deliver results through it.
pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
/// Receiver half of the runtime inbox, drained once per frame.
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// The id the next `next_id` call will issue. Every id issued so far
    /// is strictly below it.
    pub fn peek(&self) -> TaskId {
        TaskId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    Signup,
    Profile,
    PostsFetch,
    PostSave,
    PostDelete,
}

#[derive(Debug, Clone, Copy)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted {
    pub id: TaskId,
    pub result: Box<UiEvent>,
}

/// Task lifecycle state (stored in app state, mutated only by the reducer).
///
/// A completion whose id no longer matches the active task is discarded;
/// this is the guard against acting on a result whose originating screen
/// has already been torn down.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: TaskStarted) {
        self.active = Some(started.id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub signup: TaskState,
    pub profile: TaskState,
    pub posts_fetch: TaskState,
    pub post_save: TaskState,
    pub post_delete: TaskState,
    /// Ids issued before the last `reset` are below this floor.
    floor: TaskId,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Login => &self.login,
            TaskKind::Signup => &self.signup,
            TaskKind::Profile => &self.profile,
            TaskKind::PostsFetch => &self.posts_fetch,
            TaskKind::PostSave => &self.post_save,
            TaskKind::PostDelete => &self.post_delete,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::Signup => &mut self.signup,
            TaskKind::Profile => &mut self.profile,
            TaskKind::PostsFetch => &mut self.posts_fetch,
            TaskKind::PostSave => &mut self.post_save,
            TaskKind::PostDelete => &mut self.post_delete,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.login.is_running()
            || self.signup.is_running()
            || self.profile.is_running()
            || self.posts_fetch.is_running()
            || self.post_save.is_running()
            || self.post_delete.is_running()
    }

    /// Whether a `TaskStarted` with this id belongs to the current screen.
    /// A start notification still queued from before the last reset is
    /// rejected; accepting it would re-arm `finish_if_active` and let the
    /// stale completion through.
    pub fn accepts(&self, id: TaskId) -> bool {
        id >= self.floor
    }

    /// Forgets every in-flight task and raises the id floor so queued
    /// start/completion notifications from before the reset are dropped.
    /// `floor` is the sequence's next unissued id.
    pub fn reset(&mut self, floor: TaskId) {
        *self = Tasks {
            floor,
            ..Tasks::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_completion_is_rejected() {
        let mut state = TaskState::default();
        state.on_started(TaskStarted { id: TaskId(1) });
        assert!(!state.finish_if_active(TaskId(0)));
        assert!(state.is_running());
        assert!(state.finish_if_active(TaskId(1)));
        assert!(!state.is_running());
    }

    #[test]
    fn reset_discards_all_active_tasks() {
        let mut tasks = Tasks::default();
        tasks.posts_fetch.on_started(TaskStarted { id: TaskId(3) });
        tasks.profile.on_started(TaskStarted { id: TaskId(4) });
        assert!(tasks.is_any_running());
        tasks.reset(TaskId(5));
        assert!(!tasks.is_any_running());
        assert!(!tasks.posts_fetch.finish_if_active(TaskId(3)));
    }

    #[test]
    fn started_ids_below_the_reset_floor_are_rejected() {
        let mut tasks = Tasks::default();
        assert!(tasks.accepts(TaskId(0)));
        tasks.reset(TaskId(2));
        assert!(!tasks.accepts(TaskId(0)));
        assert!(!tasks.accepts(TaskId(1)));
        assert!(tasks.accepts(TaskId(2)));
    }
}
