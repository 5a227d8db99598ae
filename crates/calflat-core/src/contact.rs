//! Organizer and attendee addresses.
//!
//! iCalendar feeds encode calendar users either as a bare `mailto:` URI or
//! as a structured property with a `CN` display-name parameter. [`Mailbox`]
//! models the two shapes as a tagged variant so the rendering rule lives in
//! one place instead of scattered type sniffing.

/// A calendar user address, with or without a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mailbox {
    /// A bare address.
    Address {
        /// The address with any `mailto:` prefix stripped.
        raw: String,
    },
    /// An address with a display name.
    Named {
        /// The display name (`CN` parameter).
        name: String,
        /// The address with any `mailto:` prefix stripped.
        raw: String,
    },
}

impl Mailbox {
    /// Builds a mailbox from a property value and an optional display name.
    ///
    /// An empty display name counts as absent, matching feeds that emit
    /// `CN=""`.
    pub fn from_parts(name: Option<&str>, value: &str) -> Self {
        let raw = strip_mailto(value).to_string();
        match name {
            Some(name) if !name.is_empty() => Self::Named {
                name: name.to_string(),
                raw,
            },
            _ => Self::Address { raw },
        }
    }

    /// The address without any display name.
    pub fn address(&self) -> &str {
        match self {
            Self::Address { raw } | Self::Named { raw, .. } => raw,
        }
    }

    /// The display name, when present.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            Self::Address { .. } => None,
        }
    }

    /// Renders `Name <address>` when a name is present, else the bare
    /// address.
    pub fn display(&self) -> String {
        match self {
            Self::Named { name, raw } => format!("{} <{}>", name, raw),
            Self::Address { raw } => raw.clone(),
        }
    }
}

/// Joins attendee mailboxes with `"; "`, preserving input order.
pub fn join_attendees(attendees: &[Mailbox]) -> String {
    attendees
        .iter()
        .map(Mailbox::display)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Strips a leading `mailto:` scheme, case-insensitively.
fn strip_mailto(value: &str) -> &str {
    let prefix_len = "mailto:".len();
    if value.len() >= prefix_len && value[..prefix_len].eq_ignore_ascii_case("mailto:") {
        &value[prefix_len..]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_address_strips_mailto() {
        let mailbox = Mailbox::from_parts(None, "mailto:alice@example.com");
        assert_eq!(mailbox.address(), "alice@example.com");
        assert_eq!(mailbox.name(), None);
        assert_eq!(mailbox.display(), "alice@example.com");
    }

    #[test]
    fn uppercase_mailto_is_stripped_too() {
        let mailbox = Mailbox::from_parts(None, "MAILTO:bob@example.com");
        assert_eq!(mailbox.address(), "bob@example.com");
    }

    #[test]
    fn named_mailbox_renders_angle_form() {
        let mailbox = Mailbox::from_parts(Some("Alice Liddell"), "mailto:alice@example.com");
        assert_eq!(mailbox.display(), "Alice Liddell <alice@example.com>");
    }

    #[test]
    fn empty_name_falls_back_to_bare_address() {
        let mailbox = Mailbox::from_parts(Some(""), "mailto:carol@example.com");
        assert_eq!(mailbox.display(), "carol@example.com");
    }

    #[test]
    fn join_preserves_order() {
        let attendees = vec![
            Mailbox::from_parts(Some("Bob"), "mailto:bob@example.com"),
            Mailbox::from_parts(None, "mailto:carol@example.com"),
        ];
        assert_eq!(
            join_attendees(&attendees),
            "Bob <bob@example.com>; carol@example.com"
        );
    }

    #[test]
    fn join_of_empty_list_is_empty() {
        assert_eq!(join_attendees(&[]), "");
    }
}
