//! Session tokens kept in `localStorage` so a reload stays signed in

use web_sys::{window, Storage};

#[derive(Debug, Clone, Copy)]
enum Slot {
    Access,
    Refresh,
}

impl Slot {
    const ALL: [Slot; 2] = [Slot::Access, Slot::Refresh];

    fn key(self) -> &'static str {
        match self {
            Slot::Access => "dashboard_access_token",
            Slot::Refresh => "dashboard_refresh_token",
        }
    }
}

fn storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

fn write(slot: Slot, token: &str) {
    let Some(storage) = storage() else {
        log::warn!("localStorage unavailable; session will not survive a reload");
        return;
    };
    if storage.set_item(slot.key(), token).is_err() {
        log::warn!("Could not store {}", slot.key());
    }
}

fn read(slot: Slot) -> Option<String> {
    storage()?
        .get_item(slot.key())
        .ok()?
        .filter(|t| !t.is_empty())
}

pub fn save_access_token(token: &str) {
    write(Slot::Access, token);
}

pub fn get_access_token() -> Option<String> {
    read(Slot::Access)
}

pub fn save_refresh_token(token: &str) {
    write(Slot::Refresh, token);
}

pub fn get_refresh_token() -> Option<String> {
    read(Slot::Refresh)
}

/// Forget both tokens (sign-out or a dead session)
pub fn clear_tokens() {
    if let Some(storage) = storage() {
        for slot in Slot::ALL {
            let _ = storage.remove_item(slot.key());
        }
    }
}
