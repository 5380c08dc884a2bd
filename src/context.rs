//! Application Context
//!
//! Session and notification signals provided via Leptos Context API.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::error::{ApiError, SESSION_EXPIRED};
use crate::models::User;
use crate::session::{Session, SessionStore};
use crate::storage::BrowserStorage;

/// Banners auto-dismiss after this many milliseconds
const NOTICE_TIMEOUT_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notice success",
            NoticeKind::Info => "notice info",
            NoticeKind::Warning => "notice warning",
            NoticeKind::Error => "notice error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Signed-in user (None = show login) - read
    pub current_user: ReadSignal<Option<User>>,
    /// Signed-in user - write
    set_current_user: WriteSignal<Option<User>>,
    /// Visible banners - read
    pub notices: ReadSignal<Vec<Notice>>,
    /// Visible banners - write
    set_notices: WriteSignal<Vec<Notice>>,
    next_notice_id: StoredValue<u32>,
}

impl AppContext {
    pub fn new(
        current_user: (ReadSignal<Option<User>>, WriteSignal<Option<User>>),
        notices: (ReadSignal<Vec<Notice>>, WriteSignal<Vec<Notice>>),
    ) -> Self {
        Self {
            current_user: current_user.0,
            set_current_user: current_user.1,
            notices: notices.0,
            set_notices: notices.1,
            next_notice_id: StoredValue::new(1),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.with(Option::is_some)
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.with(|u| u.as_ref().is_some_and(User::is_admin))
    }

    /// Persist the session and enter the console
    pub fn login(&self, session: Session) {
        SessionStore::new(&BrowserStorage).save(&session);
        log::info!("Signed in as {}", session.user.email);
        self.set_current_user.set(Some(session.user));
    }

    /// Drop the stored session and return to the login screen
    pub fn logout(&self) {
        SessionStore::new(&BrowserStorage).clear();
        self.set_current_user.set(None);
    }

    /// Forced logout after a 401; storage was already cleared by the client
    pub fn session_expired(&self) {
        if self.current_user.get_untracked().is_some() {
            self.set_current_user.set(None);
            self.notify(NoticeKind::Warning, SESSION_EXPIRED);
        }
    }

    pub fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        let id = self.next_notice_id.get_value();
        self.next_notice_id.set_value(id.wrapping_add(1));
        let notice = Notice { id, kind, message: message.into() };
        self.set_notices.update(|list| list.push(notice));

        let ctx = *self;
        Timeout::new(NOTICE_TIMEOUT_MS, move || ctx.dismiss(id)).forget();
    }

    /// Banner and console log for a failed request; 401 is handled by the client hook
    pub fn report_error(&self, action: &str, error: &ApiError) {
        log::error!("{} failed: {}", action, error);
        if !error.is_unauthorized() {
            self.notify(NoticeKind::Error, error.banner());
        }
    }

    pub fn dismiss(&self, id: u32) {
        self.set_notices.update(|list| list.retain(|n| n.id != id));
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
