//! Property-based tests for line parsing, classification and syncing.
//!
//! Run with: `cargo test --test proptest_parser`

use proptest::prelude::*;
use slirc_sync::{ClientConfig, IrcClient, MessageKind, ParsedMessage};

// =============================================================================
// STRATEGIES
// =============================================================================

/// Nickname: letter or special char first, max 9 chars.
fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z\\[\\]\\\\^_`{|}][a-zA-Z0-9\\-\\[\\]\\\\^_`{|}]{0,8}")
        .expect("valid regex")
}

fn username_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("~?[a-zA-Z][a-zA-Z0-9]{0,9}").expect("valid regex")
}

fn hostname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]+(\\.[a-z0-9]+)*").expect("valid regex")
}

fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&!+][a-zA-Z0-9_\\-]{1,49}").expect("valid regex")
}

/// Plain text: no CR, LF, NUL or CTCP delimiter.
fn message_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0\x01]{0,400}").expect("valid regex")
}

/// Arbitrary single line, including garbage.
fn any_line_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n]{0,512}").expect("valid regex")
}

/// A line shaped like server traffic, with random fields.
fn server_line_strategy() -> impl Strategy<Value = String> {
    let command = prop_oneof![
        Just("PRIVMSG"),
        Just("NOTICE"),
        Just("JOIN"),
        Just("PART"),
        Just("KICK"),
        Just("QUIT"),
        Just("NICK"),
        Just("MODE"),
        Just("TOPIC"),
        Just("INVITE"),
        Just("001"),
        Just("324"),
        Just("332"),
        Just("352"),
        Just("353"),
        Just("433"),
    ];
    (
        nickname_strategy(),
        command,
        prop::collection::vec("[a-zA-Z0-9#@+*:~.!-]{1,12}", 0..10),
        prop::option::of(message_text_strategy()),
    )
        .prop_map(|(nick, command, params, trailing)| {
            let mut line = format!(":{}!u@h {}", nick, command);
            for param in params {
                line.push(' ');
                line.push_str(&param);
            }
            if let Some(text) = trailing {
                line.push_str(" :");
                line.push_str(&text);
            }
            line
        })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn parse_never_panics(line in any_line_strategy()) {
        let msg = ParsedMessage::parse(&line);
        prop_assert_eq!(msg.raw, line.as_str());
    }

    #[test]
    fn trailing_and_trailing_tokens_agree(line in any_line_strategy()) {
        let msg = ParsedMessage::parse(&line);
        prop_assert_eq!(msg.trailing.is_none(), msg.trailing_tokens.is_none());
        if let (Some(text), Some(tokens)) = (msg.trailing, msg.trailing_tokens.as_ref()) {
            prop_assert_eq!(tokens.join(" "), text);
        }
    }

    #[test]
    fn tokens_rejoin_to_the_raw_line(line in any_line_strategy()) {
        let msg = ParsedMessage::parse(&line);
        prop_assert_eq!(msg.tokens.join(" "), line);
    }

    #[test]
    fn channel_message_fields(
        nick in nickname_strategy(),
        user in username_strategy(),
        host in hostname_strategy(),
        channel in channel_strategy(),
        text in message_text_strategy(),
    ) {
        let line = format!(":{}!{}@{} PRIVMSG {} :{}", nick, user, host, channel, text);
        let msg = ParsedMessage::parse(&line);

        prop_assert_eq!(msg.kind, MessageKind::ChannelMessage);
        prop_assert_eq!(msg.nick, Some(nick.as_str()));
        prop_assert_eq!(msg.ident, Some(user.as_str()));
        prop_assert_eq!(msg.host, Some(host.as_str()));
        prop_assert_eq!(msg.channel, Some(channel.as_str()));
        prop_assert_eq!(msg.trailing, Some(text.as_str()));
        prop_assert!(msg.diagnostic.is_none());
    }

    #[test]
    fn action_to_channel_is_channel_action(
        nick in nickname_strategy(),
        channel in channel_strategy(),
        text in message_text_strategy(),
    ) {
        let line = format!(":{}!u@h PRIVMSG {} :\x01ACTION {}\x01", nick, channel, text);
        prop_assert_eq!(ParsedMessage::parse(&line).kind, MessageKind::ChannelAction);
    }

    #[test]
    fn private_message_is_query(
        nick in nickname_strategy(),
        target in nickname_strategy(),
        text in message_text_strategy(),
    ) {
        let line = format!(":{}!u@h PRIVMSG {} :{}", nick, target, text);
        let msg = ParsedMessage::parse(&line);
        prop_assert_eq!(msg.kind, MessageKind::QueryMessage);
        prop_assert_eq!(msg.channel, None);
    }

    #[test]
    fn synced_client_survives_random_traffic(
        lines in prop::collection::vec(server_line_strategy(), 1..40),
    ) {
        let mut config = ClientConfig::new("me", "Me");
        config.channel_syncing = true;
        let mut client = IrcClient::new(config);
        client.process_line(":me!u@h JOIN :#chan");

        for line in &lines {
            client.process_line(line);
        }

        // Every membership must resolve to a tracked user.
        let state = client.state();
        for channel in state.channels() {
            for (_, member) in channel.users() {
                prop_assert!(state.user_by_id(member.user_id()).is_some());
            }
        }
    }

    #[test]
    fn join_then_part_leaves_no_membership(
        nick in nickname_strategy(),
        channel in channel_strategy(),
    ) {
        prop_assume!(!slirc_sync::irc_eq(&nick, "me"));
        let mut config = ClientConfig::new("me", "Me");
        config.channel_syncing = true;
        let mut client = IrcClient::new(config);

        client.process_line(&format!(":me!u@h JOIN :{}", channel));
        client.process_line(&format!(":{}!u@h JOIN :{}", nick, channel));
        prop_assert!(client.is_joined_by(&channel, &nick));

        client.process_line(&format!(":{}!u@h PART {}", nick, channel));
        prop_assert!(!client.is_joined_by(&channel, &nick));
        prop_assert!(client.is_joined(&channel));
    }
}
