use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashSet;
use thiserror::Error;

use crate::core::conversations::{build_conversations, search_conversations, thread_messages};
use crate::models::{Conversation, Listing, Message, User};
use crate::services::fixtures::FixtureData;

/// Errors that can occur with messaging operations
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Message content must not be blank")]
    EmptyMessage,

    #[error("Cannot message yourself")]
    SelfMessage,
}

/// In-memory marketplace data: fixture users, listings and messages
///
/// Users are fixed at start-up. Listings and messages accept session-only
/// additions that are lost on restart.
#[derive(Debug, Default)]
pub struct Catalog {
    users: Vec<User>,
    listings: RwLock<Vec<Listing>>,
    messages: RwLock<Vec<Message>>,
}

impl Catalog {
    pub fn new(data: FixtureData) -> Self {
        tracing::info!(
            "Catalog loaded: {} users, {} listings, {} messages",
            data.users.len(),
            data.listings.len(),
            data.messages.len()
        );

        Self {
            users: data.users,
            listings: RwLock::new(data.listings),
            messages: RwLock::new(data.messages),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, user_id: &str) -> Option<User> {
        self.users.iter().find(|u| u.id == user_id).cloned()
    }

    pub fn listing(&self, listing_id: &str) -> Option<Listing> {
        self.listings.read().iter().find(|l| l.id == listing_id).cloned()
    }

    pub fn listing_count(&self) -> usize {
        self.listings.read().len()
    }

    /// Run `f` over the current listings without cloning them
    pub fn with_listings<R>(&self, f: impl FnOnce(&[Listing]) -> R) -> R {
        let listings = self.listings.read();
        f(&listings)
    }

    /// Listings whose id is in `ids`, in catalog order; unknown ids are dropped
    pub fn listings_by_ids(&self, ids: &HashSet<String>) -> Vec<Listing> {
        self.listings
            .read()
            .iter()
            .filter(|l| ids.contains(&l.id))
            .cloned()
            .collect()
    }

    /// Distinct listing locations in catalog order
    pub fn locations(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.listings
            .read()
            .iter()
            .filter(|l| seen.insert(l.location.clone()))
            .map(|l| l.location.clone())
            .collect()
    }

    pub fn add_listing(&self, listing: Listing) {
        tracing::info!("Adding listing {} ({})", listing.id, listing.name);
        self.listings.write().push(listing);
    }

    /// Conversation list for `user_id`, optionally narrowed by a search term
    pub fn conversations_for(&self, user_id: &str, search: Option<&str>) -> Vec<Conversation> {
        let conversations = {
            let listings = self.listings.read();
            let messages = self.messages.read();
            build_conversations(user_id, &messages, &listings, &self.users)
        };

        match search {
            Some(term) => search_conversations(&conversations, term),
            None => conversations,
        }
    }

    /// One chat thread, oldest message first
    pub fn thread(
        &self,
        listing_id: &str,
        user_id: &str,
        other_user_id: &str,
    ) -> Result<(Listing, User, Vec<Message>), MessagingError> {
        let listing = self
            .listing(listing_id)
            .ok_or_else(|| MessagingError::ListingNotFound(listing_id.to_string()))?;
        if self.user(user_id).is_none() {
            return Err(MessagingError::UserNotFound(user_id.to_string()));
        }
        let other_user = self
            .user(other_user_id)
            .ok_or_else(|| MessagingError::UserNotFound(other_user_id.to_string()))?;

        let messages = thread_messages(listing_id, user_id, other_user_id, &self.messages.read());
        Ok((listing, other_user, messages))
    }

    /// Append a message to the session-only log
    pub fn send_message(
        &self,
        listing_id: &str,
        from_user_id: &str,
        to_user_id: &str,
        content: &str,
    ) -> Result<Message, MessagingError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(MessagingError::EmptyMessage);
        }
        if from_user_id == to_user_id {
            return Err(MessagingError::SelfMessage);
        }
        if self.listing(listing_id).is_none() {
            return Err(MessagingError::ListingNotFound(listing_id.to_string()));
        }
        for user_id in [from_user_id, to_user_id] {
            if self.user(user_id).is_none() {
                return Err(MessagingError::UserNotFound(user_id.to_string()));
            }
        }

        let message = Message {
            id: format!("msg-{}", uuid::Uuid::new_v4()),
            listing_id: listing_id.to_string(),
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
        };

        tracing::debug!("Message {} on {} from {} to {}", message.id, listing_id, from_user_id, to_user_id);
        self.messages.write().push(message.clone());
        Ok(message)
    }
}
