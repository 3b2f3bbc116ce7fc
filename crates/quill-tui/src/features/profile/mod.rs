//! Signed-in user panel shown alongside the post list.

pub mod render;

use quill_core::api::User;

pub use render::render_profile;

/// Profile fetch lifecycle. A failed fetch never leaves the loading
/// phase; the panel simply keeps its placeholder and the failure is
/// logged. The rest of the screen is unaffected.
#[derive(Debug, Default)]
pub enum ProfilePhase {
    #[default]
    Loading,
    Loaded(User),
}

#[derive(Debug, Default)]
pub struct ProfileState {
    pub phase: ProfilePhase,
}

impl ProfileState {
    pub fn set_loaded(&mut self, user: User) {
        self.phase = ProfilePhase::Loaded(user);
    }

    pub fn user(&self) -> Option<&User> {
        match &self.phase {
            ProfilePhase::Loading => None,
            ProfilePhase::Loaded(user) => Some(user),
        }
    }
}
