//! Password change: the preferences form and its submission handler
//!
//! The handler checks a submission in a fixed order and stops at the first
//! failure, answering with a return code the preferences page turns into a
//! message. Stored passwords are `sha256(salt + password)` in lowercase hex.

use crate::forms::element::SubmittedData;
use crate::forms::elements::{Content, Label, Password, Submit};
use crate::forms::{BasicAttributes, Form, FormContext};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use url::form_urlencoded;

pub const FORM_ID: &str = "resetPassword";
pub const PROCESS_URL: &str = "preferencesPasswordProcess.php";
const RETURN_PAGE: &str = "/preferences.php";
const SALT_CHARS: &[u8] = b"./ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const SALT_LENGTH: usize = 22;

/// Strength rules for new passwords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    pub min_length: usize,
    /// At least one upper and one lower case letter
    pub require_mixed_case: bool,
    pub require_numeric: bool,
    /// At least one character that is not a letter or digit
    pub require_punctuation: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_mixed_case: true,
            require_numeric: true,
            require_punctuation: false,
        }
    }
}

impl PasswordPolicy {
    pub fn matches(&self, password: &str) -> bool {
        if password.chars().count() < self.min_length {
            return false;
        }
        if self.require_mixed_case
            && !(password.chars().any(char::is_uppercase)
                && password.chars().any(char::is_lowercase))
        {
            return false;
        }
        if self.require_numeric && !password.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        if self.require_punctuation && password.chars().all(char::is_alphanumeric) {
            return false;
        }
        true
    }

    /// Human-readable list of the rules, for the form's description line
    pub fn describe(&self) -> String {
        let mut rules = Vec::new();
        if self.require_mixed_case {
            rules.push(
                "contain at least one lowercase letter, and one uppercase letter".to_string(),
            );
        }
        if self.require_numeric {
            rules.push("contain at least one number".to_string());
        }
        if self.require_punctuation {
            rules.push("contain at least one non-alphanumeric character".to_string());
        }
        rules.push(format!("be at least {} characters in length", self.min_length));
        format!("The password policy stipulates that passwords must: {}.", rules.join("; "))
    }
}

/// Result codes understood by the preferences page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    /// A required field was blank
    MissingFields,
    /// Storing the new password failed
    UpdateFailed,
    /// The current password was wrong
    IncorrectPassword,
    /// The new password and its confirmation differ
    ConfirmationMismatch,
    /// The new password fails the policy
    PolicyNotMet,
    /// The new password equals the current one
    PasswordUnchanged,
    /// Password changed, but the forced-reset flag could not be cleared
    ResetFlagFailed,
    Success,
    /// Password changed after a forced reset
    ResetSuccess,
}

impl ReturnCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnCode::MissingFields => "error1",
            ReturnCode::UpdateFailed => "error2",
            ReturnCode::IncorrectPassword => "error3",
            ReturnCode::ConfirmationMismatch => "error4",
            ReturnCode::PolicyNotMet => "error6",
            ReturnCode::PasswordUnchanged => "error7",
            ReturnCode::ResetFlagFailed => "errora",
            ReturnCode::Success => "success0",
            ReturnCode::ResetSuccess => "successa",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ReturnCode::Success | ReturnCode::ResetSuccess)
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session fields the password workflow reads and updates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordSession {
    pub username: String,
    pub password_strong: String,
    pub password_strong_salt: String,
    pub password_force_reset: bool,
    pub page_loads: Option<u32>,
}

/// Persistence for user credentials
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore {
    fn update_password(&self, username: &str, hash: &str, salt: &str) -> Result<()>;

    fn clear_force_reset(&self, username: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChangeOutcome {
    pub code: ReturnCode,
    /// Where to send the browser next
    pub redirect: String,
}

/// `sha256(salt + password)` as lowercase hex
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Random salt drawn from `[./A-Za-z0-9]`
pub fn generate_salt() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    (0..SALT_LENGTH)
        .map(|_| SALT_CHARS[rng.random_range(0..SALT_CHARS.len())] as char)
        .collect()
}

/// Preferences page URL carrying the reset flag and a return code
pub fn redirect_url(force_reset: bool, code: ReturnCode) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", RETURN_PAGE)
        .append_pair("forceReset", if force_reset { "Y" } else { "N" })
        .append_pair("return", code.as_str())
        .finish();
    format!("index.php?{query}")
}

/// Build the change-password form shown on the preferences page
pub fn password_form(ctx: &FormContext, policy: &PasswordPolicy, force_reset: bool) -> Form {
    let locale = ctx.locale();
    let t = |text: &str| locale.translate(text, &[]);

    let mut form = Form::create(ctx, FORM_ID, PROCESS_URL);
    form.set_title(&t("Reset Password"))
        .set_autocomplete_value("off")
        .add_hidden_value("forceReset", if force_reset { "Y" } else { "N" });

    if force_reset {
        let mut warning = Content::text(&t(
            "Your account has been flagged for a password reset. You cannot continue into the system until you change your password.",
        ));
        warning.set_class("warning");
        form.add_row("").add_element(warning);
    }

    form.add_row("")
        .add_label("password", &t("Current Password"))
        .add_element(Password::new("password").required().autocomplete("current-password"));

    form.add_row("")
        .add_element(Label::new("passwordNew", &t("New Password")).description(&policy.describe()))
        .add_element(Password::new("passwordNew").required().autocomplete("new-password"));

    form.add_row("")
        .add_label("passwordConfirm", &t("Confirm New Password"))
        .add_element(Password::new("passwordConfirm").required().autocomplete("new-password"));

    form.add_row("").add_element(Submit::new(&t("Submit")));
    form
}

/// Check and apply a password change submitted from [`password_form`].
///
/// On success the store and `session` hold the new salt and hash and the
/// session's page-load counter is reset.
pub fn process_password_change(
    data: &SubmittedData,
    session: &mut PasswordSession,
    store: &dyn CredentialStore,
    policy: &PasswordPolicy,
) -> PasswordChangeOutcome {
    let force_reset = session.password_force_reset;
    let code = check_and_apply(data, session, store, policy);
    tracing::info!(username = %session.username, code = %code, "password change processed");
    PasswordChangeOutcome {
        code,
        redirect: redirect_url(force_reset, code),
    }
}

fn check_and_apply(
    data: &SubmittedData,
    session: &mut PasswordSession,
    store: &dyn CredentialStore,
    policy: &PasswordPolicy,
) -> ReturnCode {
    let password = field(data, "password");
    let password_new = field(data, "passwordNew");
    let password_confirm = field(data, "passwordConfirm");

    if password.is_empty() || password_new.is_empty() || password_confirm.is_empty() {
        return ReturnCode::MissingFields;
    }
    if password == password_new {
        return ReturnCode::PasswordUnchanged;
    }
    if !policy.matches(password_new) {
        return ReturnCode::PolicyNotMet;
    }
    if password_new != password_confirm {
        return ReturnCode::ConfirmationMismatch;
    }
    if hash_password(&session.password_strong_salt, password) != session.password_strong {
        return ReturnCode::IncorrectPassword;
    }

    let salt = generate_salt();
    let hash = hash_password(&salt, password_new);
    if let Err(err) = store.update_password(&session.username, &hash, &salt) {
        tracing::error!(username = %session.username, "failed to store new password: {err:#}");
        return ReturnCode::UpdateFailed;
    }

    let code = if session.password_force_reset {
        if let Err(err) = store.clear_force_reset(&session.username) {
            tracing::error!(username = %session.username, "failed to clear reset flag: {err:#}");
            return ReturnCode::ResetFlagFailed;
        }
        session.password_force_reset = false;
        ReturnCode::ResetSuccess
    } else {
        ReturnCode::Success
    };

    session.password_strong_salt = salt;
    session.password_strong = hash;
    session.page_loads = None;
    code
}

fn field<'a>(data: &'a SubmittedData, name: &str) -> &'a str {
    data.get(name).and_then(|v| v.as_single()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::element::SubmittedValue;

    const SALT: &str = "abcdefghijklmnopqrstuv";
    const CURRENT: &str = "OldPassw0rd";
    const NEW: &str = "NewPassw0rd";

    fn session(force_reset: bool) -> PasswordSession {
        PasswordSession {
            username: "admin".to_string(),
            password_strong: hash_password(SALT, CURRENT),
            password_strong_salt: SALT.to_string(),
            password_force_reset: force_reset,
            page_loads: Some(4),
        }
    }

    fn submission(password: &str, new: &str, confirm: &str) -> SubmittedData {
        [("password", password), ("passwordNew", new), ("passwordConfirm", confirm)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), SubmittedValue::from(v)))
            .collect()
    }

    /// A store that must not be touched
    fn untouched_store() -> MockCredentialStore {
        let mut store = MockCredentialStore::new();
        store.expect_update_password().never();
        store.expect_clear_force_reset().never();
        store
    }

    mod policy {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_policy() {
            let policy = PasswordPolicy::default();
            assert!(policy.matches("Abcdefg1"));
            assert!(!policy.matches("Abcdef1"));
            assert!(!policy.matches("abcdefg1"));
            assert!(!policy.matches("Abcdefgh"));
        }

        #[test]
        fn test_punctuation_rule() {
            let policy = PasswordPolicy {
                require_punctuation: true,
                ..PasswordPolicy::default()
            };
            assert!(!policy.matches("Abcdefg1"));
            assert!(policy.matches("Abcdef!1"));
        }

        #[test]
        fn test_describe_lists_rules() {
            let text = PasswordPolicy::default().describe();
            assert!(text.contains("at least one number"));
            assert!(text.contains("at least 8 characters"));
            assert!(!text.contains("non-alphanumeric"));
        }
    }

    mod hashing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_hash_is_sha256_of_salt_then_password() {
            assert_eq!(
                hash_password("", "abc"),
                "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
            );
            assert_eq!(hash_password("ab", "c"), hash_password("", "abc"));
        }

        #[test]
        fn test_salt_shape() {
            let salt = generate_salt();
            assert_eq!(salt.len(), SALT_LENGTH);
            assert!(salt.bytes().all(|b| SALT_CHARS.contains(&b)));
        }
    }

    mod redirects {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_redirect_url() {
            assert_eq!(
                redirect_url(true, ReturnCode::PolicyNotMet),
                "index.php?q=%2Fpreferences.php&forceReset=Y&return=error6"
            );
        }

        #[test]
        fn test_return_code_strings() {
            assert_eq!(ReturnCode::ResetFlagFailed.to_string(), "errora");
            assert_eq!(ReturnCode::Success.as_str(), "success0");
            assert!(ReturnCode::ResetSuccess.is_success());
            assert!(!ReturnCode::UpdateFailed.is_success());
        }
    }

    mod processing {
        use super::*;
        use pretty_assertions::assert_eq;

        fn process(
            data: &SubmittedData,
            session: &mut PasswordSession,
            store: &MockCredentialStore,
        ) -> ReturnCode {
            process_password_change(data, session, store, &PasswordPolicy::default()).code
        }

        #[test]
        fn test_blank_fields() {
            let expected = session(false);
            let mut session = session(false);
            let code = process(&submission(CURRENT, "", ""), &mut session, &untouched_store());
            assert_eq!(code, ReturnCode::MissingFields);
            assert_eq!(session, expected);
        }

        #[test]
        fn test_missing_keys_count_as_blank() {
            let mut session = session(false);
            let code = process(&SubmittedData::new(), &mut session, &untouched_store());
            assert_eq!(code, ReturnCode::MissingFields);
        }

        #[test]
        fn test_unchanged_checked_before_policy() {
            let mut session = session(false);
            let data = submission("weak", "weak", "weak");
            let code = process(&data, &mut session, &untouched_store());
            assert_eq!(code, ReturnCode::PasswordUnchanged);
        }

        #[test]
        fn test_policy_checked_before_confirmation() {
            let mut session = session(false);
            let data = submission(CURRENT, "weak", "other");
            let code = process(&data, &mut session, &untouched_store());
            assert_eq!(code, ReturnCode::PolicyNotMet);
        }

        #[test]
        fn test_confirmation_mismatch() {
            let mut session = session(false);
            let data = submission(CURRENT, NEW, "NewPassw0rd!");
            let code = process(&data, &mut session, &untouched_store());
            assert_eq!(code, ReturnCode::ConfirmationMismatch);
        }

        #[test]
        fn test_wrong_current_password() {
            let mut session = session(false);
            let data = submission("Wr0ngPassword", NEW, NEW);
            let code = process(&data, &mut session, &untouched_store());
            assert_eq!(code, ReturnCode::IncorrectPassword);
        }

        #[test]
        fn test_store_failure() {
            let mut store = MockCredentialStore::new();
            store
                .expect_update_password()
                .times(1)
                .returning(|_, _, _| Err(anyhow::anyhow!("database unavailable")));
            store.expect_clear_force_reset().never();
            let expected = session(false);
            let mut session = session(false);
            let code = process(&submission(CURRENT, NEW, NEW), &mut session, &store);
            assert_eq!(code, ReturnCode::UpdateFailed);
            assert_eq!(session, expected);
        }

        #[test]
        fn test_success_updates_session() {
            let mut store = MockCredentialStore::new();
            store
                .expect_update_password()
                .withf(|username, hash, salt| {
                    username == "admin" && hash == hash_password(salt, NEW)
                })
                .times(1)
                .returning(|_, _, _| Ok(()));
            store.expect_clear_force_reset().never();

            let mut session = session(false);
            let outcome = process_password_change(
                &submission(CURRENT, NEW, NEW),
                &mut session,
                &store,
                &PasswordPolicy::default(),
            );

            assert_eq!(outcome.code, ReturnCode::Success);
            assert_eq!(
                outcome.redirect,
                "index.php?q=%2Fpreferences.php&forceReset=N&return=success0"
            );
            assert_ne!(session.password_strong_salt, SALT);
            assert_eq!(session.password_strong, hash_password(&session.password_strong_salt, NEW));
            assert_eq!(session.page_loads, None);
        }

        #[test]
        fn test_forced_reset_success_clears_flag() {
            let mut store = MockCredentialStore::new();
            store.expect_update_password().times(1).returning(|_, _, _| Ok(()));
            store
                .expect_clear_force_reset()
                .withf(|username| username == "admin")
                .times(1)
                .returning(|_| Ok(()));

            let mut session = session(true);
            let outcome = process_password_change(
                &submission(CURRENT, NEW, NEW),
                &mut session,
                &store,
                &PasswordPolicy::default(),
            );

            assert_eq!(outcome.code, ReturnCode::ResetSuccess);
            assert!(outcome.redirect.contains("forceReset=Y"));
            assert!(!session.password_force_reset);
        }

        #[test]
        fn test_forced_reset_flag_failure() {
            let mut store = MockCredentialStore::new();
            store.expect_update_password().times(1).returning(|_, _, _| Ok(()));
            store
                .expect_clear_force_reset()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("locked")));

            let mut session = session(true);
            let code = process(&submission(CURRENT, NEW, NEW), &mut session, &store);
            assert_eq!(code, ReturnCode::ResetFlagFailed);
            assert!(session.password_force_reset);
        }
    }

    mod form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_password_form_structure() {
            let form = password_form(&FormContext::default(), &PasswordPolicy::default(), false);
            assert_eq!(form.id(), FORM_ID);
            assert_eq!(form.action(), PROCESS_URL);
            assert_eq!(form.autocomplete(), "off");
            assert_eq!(form.rows().len(), 4);
            assert_eq!(form.hidden_values()[0].value, "N");
        }

        #[test]
        fn test_forced_reset_adds_warning() {
            let form = password_form(&FormContext::default(), &PasswordPolicy::default(), true);
            assert_eq!(form.rows().len(), 5);
            assert_eq!(form.hidden_values()[0].value, "Y");
            assert!(form.output().contains("flagged for a password reset"));
        }

        #[test]
        fn test_password_fields_required() {
            let form = password_form(&FormContext::default(), &PasswordPolicy::default(), false);
            let output = form.output();
            assert_eq!(output.matches(" required ").count(), 3);
            assert!(output.contains("The password policy stipulates"));
        }
    }
}
