use std::collections::HashMap;

use crate::models::{Conversation, Listing, Message, User};

/// Stable id for the chat between two users about one listing
///
/// The pair is ordered so both participants derive the same id.
pub fn conversation_id(listing_id: &str, user_a: &str, user_b: &str) -> String {
    let (low, high) = if user_a <= user_b {
        (user_a, user_b)
    } else {
        (user_b, user_a)
    };
    format!("convo_{}_{}_{}", listing_id, low, high)
}

/// Derive the conversation list for `user_id` from the raw message log
///
/// One conversation per (listing, other participant), carrying its latest
/// message. The unread count is 1 when that latest message was addressed to
/// `user_id`. Messages that point at an unknown listing or user are skipped.
/// Newest conversation first.
pub fn build_conversations(
    user_id: &str,
    messages: &[Message],
    listings: &[Listing],
    users: &[User],
) -> Vec<Conversation> {
    let listings_by_id: HashMap<&str, &Listing> =
        listings.iter().map(|l| (l.id.as_str(), l)).collect();
    let users_by_id: HashMap<&str, &User> = users.iter().map(|u| (u.id.as_str(), u)).collect();

    let mut latest: HashMap<String, Conversation> = HashMap::new();

    for msg in messages.iter().filter(|m| m.involves(user_id)) {
        let other_id = msg.counterpart(user_id);
        let (Some(listing), Some(other_user)) = (
            listings_by_id.get(msg.listing_id.as_str()),
            users_by_id.get(other_id),
        ) else {
            tracing::debug!("Skipping message {} with dangling references", msg.id);
            continue;
        };

        let id = conversation_id(&listing.id, user_id, other_id);
        let is_newer = latest
            .get(&id)
            .map_or(true, |existing| msg.timestamp > existing.last_message.timestamp);

        if is_newer {
            let unread_count = u32::from(msg.to_user_id == user_id);
            latest.insert(
                id.clone(),
                Conversation {
                    id,
                    listing: (*listing).clone(),
                    other_user: (*other_user).clone(),
                    last_message: msg.clone(),
                    unread_count,
                },
            );
        }
    }

    let mut conversations: Vec<Conversation> = latest.into_values().collect();
    conversations.sort_by(|a, b| {
        b.last_message
            .timestamp
            .cmp(&a.last_message.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });
    conversations
}

/// Case-insensitive search over listing name, other user's name and last message
///
/// A blank term returns every conversation.
pub fn search_conversations(conversations: &[Conversation], term: &str) -> Vec<Conversation> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return conversations.to_vec();
    }

    conversations
        .iter()
        .filter(|c| {
            c.listing.name.to_lowercase().contains(&term)
                || c.other_user.name.to_lowercase().contains(&term)
                || c.last_message.content.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Messages between two users about one listing, oldest first
pub fn thread_messages(
    listing_id: &str,
    user_a: &str,
    user_b: &str,
    messages: &[Message],
) -> Vec<Message> {
    let mut thread: Vec<Message> = messages
        .iter()
        .filter(|m| {
            m.listing_id == listing_id
                && ((m.from_user_id == user_a && m.to_user_id == user_b)
                    || (m.from_user_id == user_b && m.to_user_id == user_a))
        })
        .cloned()
        .collect();
    thread.sort_by_key(|m| m.timestamp);
    thread
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoatType;
    use chrono::{Duration, Utc};

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            avatar_url: None,
            location: None,
        }
    }

    fn listing(id: &str, name: &str, owner: User) -> Listing {
        Listing {
            id: id.to_string(),
            name: name.to_string(),
            description: "A boat used in tests.".to_string(),
            price: 100_000.0,
            image_urls: vec![],
            video_url: None,
            location: "Miami".to_string(),
            length_ft: 40.0,
            boat_type: BoatType::Sailboat,
            manufacturer: None,
            year: 2020,
            cabins: None,
            fuel_type: None,
            posted_by: owner,
            posted_date: Utc::now(),
        }
    }

    fn message(id: &str, listing_id: &str, from: &str, to: &str, content: &str, minutes_ago: i64) -> Message {
        Message {
            id: id.to_string(),
            listing_id: listing_id.to_string(),
            from_user_id: from.to_string(),
            to_user_id: to.to_string(),
            content: content.to_string(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn fixture() -> (Vec<User>, Vec<Listing>, Vec<Message>) {
        let users = vec![user("user1", "Alice Skipper"), user("user2", "Bob Deckhand"), user("user3", "Captain Charlie")];
        let listings = vec![
            listing("listing1", "Azure Dream Yacht", users[1].clone()),
            listing("listing2", "Ocean Explorer Sailboat", users[0].clone()),
        ];
        let messages = vec![
            message("m1", "listing1", "user1", "user2", "Is it still available?", 60),
            message("m2", "listing1", "user2", "user1", "Yes it is", 50),
            message("m3", "listing2", "user3", "user1", "Any flexibility on the price?", 40),
            message("m4", "listing2", "user1", "user3", "What did you have in mind?", 30),
            message("m5", "listing9", "user1", "user2", "Dangling listing", 10),
        ];
        (users, listings, messages)
    }

    #[test]
    fn test_conversation_id_is_symmetric() {
        assert_eq!(conversation_id("l1", "user2", "user1"), "convo_l1_user1_user2");
        assert_eq!(conversation_id("l1", "user1", "user2"), "convo_l1_user1_user2");
    }

    #[test]
    fn test_build_conversations_keeps_latest_message() {
        let (users, listings, messages) = fixture();
        let convos = build_conversations("user1", &messages, &listings, &users);

        assert_eq!(convos.len(), 2);
        // Newest first
        assert_eq!(convos[0].id, "convo_listing2_user1_user3");
        assert_eq!(convos[0].last_message.id, "m4");
        assert_eq!(convos[0].unread_count, 0);
        assert_eq!(convos[1].last_message.id, "m2");
        assert_eq!(convos[1].unread_count, 1);
        assert_eq!(convos[1].other_user.name, "Bob Deckhand");
    }

    #[test]
    fn test_build_conversations_for_uninvolved_user_is_empty() {
        let (users, listings, messages) = fixture();
        assert!(build_conversations("user4", &messages, &listings, &users).is_empty());
    }

    #[test]
    fn test_search_conversations() {
        let (users, listings, messages) = fixture();
        let convos = build_conversations("user1", &messages, &listings, &users);

        assert_eq!(search_conversations(&convos, "").len(), 2);
        assert_eq!(search_conversations(&convos, "azure")[0].listing.id, "listing1");
        assert_eq!(search_conversations(&convos, "CHARLIE")[0].listing.id, "listing2");
        assert_eq!(search_conversations(&convos, "have in mind").len(), 1);
        assert!(search_conversations(&convos, "catamaran").is_empty());
    }

    #[test]
    fn test_thread_messages_sorted_oldest_first() {
        let (_, _, mut messages) = fixture();
        messages.reverse();
        let thread = thread_messages("listing1", "user2", "user1", &messages);
        let ids: Vec<&str> = thread.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }
}
