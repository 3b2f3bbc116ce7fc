//! Login and signup screens.
//!
//! Each screen is a small form: field focus cycling, inline error display,
//! submit via Enter. Failed submissions show the server message inline and
//! leave the form contents untouched so the user can retry.

pub mod render;
pub mod update;

pub use render::{render_login, render_signup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Login screen state.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    /// Inline error shown above the form (failed login, empty fields).
    pub error: Option<String>,
}

impl LoginForm {
    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupField {
    #[default]
    Username,
    Email,
    Password,
    ProfileImage,
}

/// Signup screen state. The profile image is a path typed by the user and
/// validated at submit; it is optional.
#[derive(Debug, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image_path: String,
    pub focus: SignupField,
    pub error: Option<String>,
}

impl SignupForm {
    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            SignupField::Username => &mut self.username,
            SignupField::Email => &mut self.email,
            SignupField::Password => &mut self.password,
            SignupField::ProfileImage => &mut self.image_path,
        }
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            SignupField::Username => SignupField::Email,
            SignupField::Email => SignupField::Password,
            SignupField::Password => SignupField::ProfileImage,
            SignupField::ProfileImage => SignupField::Username,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            SignupField::Username => SignupField::ProfileImage,
            SignupField::Email => SignupField::Username,
            SignupField::Password => SignupField::Email,
            SignupField::ProfileImage => SignupField::Password,
        };
    }
}
