//! Auth screens key handling.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{LoginForm, SignupForm};
use crate::common::{TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::events::Route;

pub fn handle_login_key(
    form: &mut LoginForm,
    tasks: &Tasks,
    task_seq: &mut TaskSeq,
    key: KeyEvent,
) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('s') if ctrl => vec![UiEffect::Navigate(Route::Signup)],
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            form.focus_next();
            vec![]
        }
        KeyCode::Enter => submit_login(form, tasks, task_seq),
        KeyCode::Backspace => {
            form.error = None;
            form.field_mut().pop();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            form.error = None;
            form.field_mut().push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn submit_login(form: &mut LoginForm, tasks: &Tasks, task_seq: &mut TaskSeq) -> Vec<UiEffect> {
    if tasks.login.is_running() {
        return vec![];
    }
    if form.email.trim().is_empty() || form.password.is_empty() {
        form.error = Some("Email and password are required".to_string());
        return vec![];
    }
    form.error = None;
    vec![UiEffect::Login {
        task: task_seq.next_id(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    }]
}

pub fn handle_signup_key(
    form: &mut SignupForm,
    tasks: &Tasks,
    task_seq: &mut TaskSeq,
    key: KeyEvent,
) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => vec![UiEffect::Navigate(Route::Login)],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('l') if ctrl => vec![UiEffect::Navigate(Route::Login)],
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            vec![]
        }
        KeyCode::Enter => submit_signup(form, tasks, task_seq),
        KeyCode::Backspace => {
            form.error = None;
            form.field_mut().pop();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            form.error = None;
            form.field_mut().push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn submit_signup(form: &mut SignupForm, tasks: &Tasks, task_seq: &mut TaskSeq) -> Vec<UiEffect> {
    if tasks.signup.is_running() {
        return vec![];
    }
    if form.username.trim().is_empty() || form.email.trim().is_empty() || form.password.is_empty()
    {
        form.error = Some("Username, email and password are required".to_string());
        return vec![];
    }

    // Profile image is optional, but a typed path must point at a file.
    let image_path = form.image_path.trim();
    let profile_image: Option<PathBuf> = if image_path.is_empty() {
        None
    } else {
        match quill_core::api::validate_image_path(Path::new(image_path)) {
            Ok(path) => Some(path),
            Err(message) => {
                form.error = Some(message);
                return vec![];
            }
        }
    };

    form.error = None;
    vec![UiEffect::Signup {
        task: task_seq.next_id(),
        username: form.username.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        profile_image,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_into(form: &mut LoginForm, text: &str) {
        for c in text.chars() {
            handle_login_key(form, &Tasks::default(), &mut TaskSeq::default(), key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn login_submit_with_empty_fields_is_rejected_locally() {
        let mut form = LoginForm::default();
        let effects = handle_login_key(
            &mut form,
            &Tasks::default(),
            &mut TaskSeq::default(),
            key(KeyCode::Enter),
        );
        assert!(effects.is_empty());
        assert_eq!(
            form.error.as_deref(),
            Some("Email and password are required")
        );
    }

    #[test]
    fn login_submit_emits_login_effect() {
        let mut form = LoginForm::default();
        type_into(&mut form, "a@b.com");
        handle_login_key(
            &mut form,
            &Tasks::default(),
            &mut TaskSeq::default(),
            key(KeyCode::Tab),
        );
        type_into(&mut form, "x");

        let effects = handle_login_key(
            &mut form,
            &Tasks::default(),
            &mut TaskSeq::default(),
            key(KeyCode::Enter),
        );
        match effects.as_slice() {
            [UiEffect::Login { email, password, .. }] => {
                assert_eq!(email, "a@b.com");
                assert_eq!(password, "x");
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn login_submit_is_ignored_while_running() {
        let mut form = LoginForm {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
            ..LoginForm::default()
        };
        let mut tasks = Tasks::default();
        tasks.login.on_started(crate::common::TaskStarted {
            id: crate::common::TaskId(7),
        });
        let effects =
            handle_login_key(&mut form, &tasks, &mut TaskSeq::default(), key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(form.error.is_none());
    }

    #[test]
    fn signup_with_bogus_image_path_is_rejected_locally() {
        let mut form = SignupForm {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            image_path: "/definitely/not/here.png".to_string(),
            ..SignupForm::default()
        };
        let effects = handle_signup_key(
            &mut form,
            &Tasks::default(),
            &mut TaskSeq::default(),
            key(KeyCode::Enter),
        );
        assert!(effects.is_empty());
        assert!(form.error.as_deref().unwrap().starts_with("No such file"));
    }
}
