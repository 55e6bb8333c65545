//! Session roster: who is present, with an assigned presence color.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use events::User;
use rand::Rng;
use uuid::Uuid;

/// Presence colors assigned to users who join without one.
pub const PRESENCE_PALETTE: [&str; 8] = [
    "#e45858", "#e4a158", "#d7e458", "#58e47a", "#58cfe4", "#5872e4", "#a158e4", "#e458b8",
];

/// Pick a presence color from the palette.
#[must_use]
pub fn assign_color() -> String {
    let i = rand::rng().random_range(0..PRESENCE_PALETTE.len());
    PRESENCE_PALETTE[i].to_owned()
}

/// The users currently in a session, in join order.
#[derive(Debug, Default)]
pub struct Roster {
    users: Vec<User>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user, or refresh an existing entry in place. A user joining
    /// with an empty color gets one assigned. Returns `true` if the user
    /// was new.
    pub fn upsert(&mut self, mut user: User) -> bool {
        if user.color.is_empty() {
            user.color = assign_color();
        }
        if let Some(existing) = self.users.iter_mut().find(|u| u.id == user.id) {
            *existing = user;
            return false;
        }
        self.users.push(user);
        true
    }

    /// Remove a user by id, returning the entry if present.
    pub fn remove(&mut self, id: Uuid) -> Option<User> {
        let pos = self.users.iter().position(|u| u.id == id)?;
        Some(self.users.remove(pos))
    }

    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    /// Users in join order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
