//! Telegram Mini App bindings
//!
//! Ad-hoc interop with the `window.Telegram.WebApp` object injected by the
//! Telegram client. Every call is a no-op outside Telegram so the game stays
//! playable in a plain browser tab.

#[cfg(target_arch = "wasm32")]
mod webapp {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(inline_js = "
        export function tg_init() {
            const app = window.Telegram && window.Telegram.WebApp;
            if (app) {
                app.ready();
                app.expand();
            }
        }

        export function tg_username() {
            const app = window.Telegram && window.Telegram.WebApp;
            const user = app && app.initDataUnsafe && app.initDataUnsafe.user;
            if (!user) return null;
            if (user.username) return user.username;
            return user.first_name + (user.last_name ? ' ' + user.last_name : '');
        }

        export function tg_show_share_button(label, score) {
            const app = window.Telegram && window.Telegram.WebApp;
            if (!app) return;
            app.MainButton.setText(label);
            app.MainButton.onClick(() => {
                app.sendData(JSON.stringify({ action: 'gameOver', score: score }));
            });
            app.MainButton.show();
        }

        export function tg_hide_share_button() {
            const app = window.Telegram && window.Telegram.WebApp;
            if (app) app.MainButton.hide();
        }
    ")]
    extern "C" {
        fn tg_init();
        fn tg_username() -> Option<String>;
        fn tg_show_share_button(label: &str, score: u32);
        fn tg_hide_share_button();
    }

    /// Signal readiness and expand to full height (no-op outside Telegram)
    pub fn init() {
        tg_init();
    }

    /// Telegram display name, if running inside Telegram
    pub fn username() -> Option<String> {
        tg_username().filter(|name| !name.is_empty())
    }

    /// Show the main button; tapping it forwards the final score to the bot
    pub fn show_share_button(score: u32) {
        tg_show_share_button("Share my score", score);
    }

    pub fn hide_share_button() {
        tg_hide_share_button();
    }
}

#[cfg(target_arch = "wasm32")]
pub use webapp::{hide_share_button, init, show_share_button, username};

// Native stubs

#[cfg(not(target_arch = "wasm32"))]
pub fn init() {}

#[cfg(not(target_arch = "wasm32"))]
pub fn username() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn show_share_button(_score: u32) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn hide_share_button() {}
