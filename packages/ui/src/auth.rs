//! Session context and hooks for the UI.

use dioxus::prelude::*;
use store::error::Result;
use store::{SessionState, User};

use crate::storage::{make_session, AppSession};
use crate::use_config;

/// The session store plus a signal mirroring its state, shared by context.
///
/// Screens call the async methods and re-render from [`SessionHandle::state`].
#[derive(Clone)]
pub struct SessionHandle {
    store: AppSession,
    state: Signal<SessionState>,
}

impl SessionHandle {
    /// Current session state. Reading it subscribes the calling component.
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    fn mark_pending(&self) {
        let mut state = self.state;
        state.write().begin();
    }

    fn sync(&self) {
        let mut state = self.state;
        state.set(self.store.snapshot());
    }

    pub async fn login(&self, email: String, password: String) -> Result<User> {
        self.mark_pending();
        let result = self.store.login(&email, &password).await;
        self.sync();
        result
    }

    pub async fn register(&self, name: String, email: String, password: String) -> Result<User> {
        self.mark_pending();
        let result = self.store.register(&name, &email, &password).await;
        self.sync();
        result
    }

    pub async fn restore_session(&self) -> Result<User> {
        self.mark_pending();
        let result = self.store.restore_session().await;
        self.sync();
        result
    }

    pub async fn logout(&self) -> Result<()> {
        let result = self.store.logout().await;
        self.sync();
        result
    }

    pub fn clear_error(&self) {
        self.store.clear_error();
        self.sync();
    }
}

/// Get the session handle provided by [`SessionProvider`].
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Provider component that owns the session store.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let config = use_config();
    let store = use_hook(|| make_session(&config));
    let state = use_signal(SessionState::default);
    let handle = use_context_provider(|| SessionHandle { store, state });

    // Restore a persisted session on mount
    let _ = use_resource(move || {
        let handle = handle.clone();
        async move {
            if let Err(e) = handle.restore_session().await {
                if e.is_user_facing() {
                    tracing::error!("Failed to restore session: {}", e);
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();

    let onclick = move |_| {
        let session = session.clone();
        async move {
            if let Err(e) = session.logout().await {
                tracing::error!("Failed to clear stored session: {}", e);
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
