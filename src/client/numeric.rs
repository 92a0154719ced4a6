//! Numeric reply handlers.

use rand::Rng;
use tracing::{debug, info, warn};

use super::{IrcClient, Reaction};
use crate::command::{Command, Outbound};
use crate::event::{IrcEvent, WhoReply};
use crate::message::ParsedMessage;
use crate::mode::{scan_channel_modes, ModeChange};
use crate::response::Response;
use crate::util::{strip_colon, truncate_chars};

/// Characters of the current nickname kept when picking a replacement.
const COLLISION_PREFIX_LEN: usize = 5;

impl IrcClient {
    pub(super) fn handle_numeric<'a>(
        &mut self,
        response: Response,
        msg: &ParsedMessage<'a>,
        r: &mut Reaction<'a>,
    ) {
        match response {
            Response::RPL_WELCOME => self.on_welcome(msg, r),
            Response::RPL_TOPIC => self.on_topic_reply(msg, msg.trailing.unwrap_or(""), r),
            Response::RPL_NOTOPIC => self.on_topic_reply(msg, "", r),
            Response::RPL_NAMREPLY => self.on_names(msg),
            Response::RPL_WHOREPLY => self.on_who(msg, r),
            Response::RPL_CHANNELMODEIS => self.on_channel_mode_is(msg),
            Response::RPL_UMODEIS => {
                if let Some(modes) = msg.token(3) {
                    self.usermode = strip_colon(modes).to_string();
                }
            }
            Response::ERR_NICKNAMEINUSE => self.on_nickname_in_use(r),
            _ => {}
        }
    }

    fn on_welcome<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let Some(nick) = msg.token(2) else {
            return;
        };
        // The server may have truncated the nickname we asked for.
        self.nickname = nick.to_string();
        info!("registered as {}", nick);
        r.emit(IrcEvent::Registered { nick });
    }

    fn on_topic_reply<'a>(
        &mut self,
        msg: &ParsedMessage<'a>,
        topic: &'a str,
        r: &mut Reaction<'a>,
    ) {
        let Some(channel) = msg.channel else {
            return;
        };

        if self.config.channel_syncing && self.is_joined(channel) {
            if let Ok(chan) = self.state.channel_mut(channel) {
                chan.topic = topic.to_string();
                debug!("stored topic for channel: {}", channel);
            }
        }

        r.emit(IrcEvent::Topic { channel, topic });
    }

    fn on_names(&mut self, msg: &ParsedMessage<'_>) {
        let (Some(channel), Some(entries)) = (msg.channel, msg.trailing_tokens.as_ref()) else {
            return;
        };
        if !self.config.channel_syncing || !self.is_joined(channel) {
            return;
        }

        for entry in entries.iter().filter(|e| !e.is_empty()) {
            let nick = entry.trim_start_matches(['@', '+']);
            let flags = &entry[..entry.len() - nick.len()];
            if nick.is_empty() {
                continue;
            }

            match self.state.add_member(channel, nick) {
                Ok(member) => {
                    member.op = flags.contains('@');
                    member.voice = flags.contains('+');
                }
                Err(e) => {
                    warn!("ignoring names entry {}: {}", entry, e);
                    return;
                }
            }
        }
        debug!("applied names listing for {}", channel);
    }

    fn on_who<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let tokens = &msg.tokens;
        if tokens.len() < 10 {
            warn!("short who reply: {:?}", msg.raw);
            return;
        }

        let hop_token = strip_colon(tokens[9]);
        let hop_count = hop_token.parse::<u32>().unwrap_or_else(|_| {
            warn!("couldn't parse hop count as integer: {:?}", hop_token);
            0
        });

        let mut reply = WhoReply {
            channel: strip_colon(tokens[3]),
            ident: tokens[4],
            host: tokens[5],
            server: tokens[6],
            nick: tokens[7],
            realname: tokens[10..].join(" "),
            hop_count,
            away: false,
            op: false,
            voice: false,
            ircop: false,
        };
        reply.apply_flags(tokens[8]);

        if self.config.channel_syncing && self.is_joined(reply.channel) {
            debug!(
                "updating userinfo (from who reply) for user: {} channel: {}",
                reply.nick, reply.channel
            );
            let (user, _) = self.state.ensure_user(reply.nick);
            user.nick = reply.nick.to_string();
            user.ident = Some(reply.ident.to_string());
            user.host = Some(reply.host.to_string());
            user.server = Some(reply.server.to_string());
            user.realname = Some(reply.realname.clone());
            user.hop_count = reply.hop_count;
            user.away = reply.away;
            user.ircop = reply.ircop;

            match self.state.add_member(reply.channel, reply.nick) {
                Ok(member) => {
                    member.op = reply.op;
                    member.voice = reply.voice;
                }
                Err(e) => warn!("{}", e),
            }
        }

        r.emit(IrcEvent::Who(reply));
    }

    fn on_channel_mode_is(&mut self, msg: &ParsedMessage<'_>) {
        let (Some(channel), Some(modes)) = (msg.channel, msg.token(4)) else {
            return;
        };
        if !self.config.channel_syncing || !self.is_joined(channel) {
            return;
        }

        let params = msg.tokens.get(5..).unwrap_or(&[]);
        let scan = scan_channel_modes(modes, params);
        for err in &scan.errors {
            warn!("channel mode reply for {}: {}", channel, err);
        }

        let Ok(chan) = self.state.channel_mut(channel) else {
            return;
        };
        chan.modes.clear();
        chan.key.clear();
        chan.user_limit = 0;
        for change in scan.changes {
            match change {
                ModeChange::Flag(dir, letter) => chan.set_flag(letter, dir.is_add()),
                ModeChange::Key(key) => chan.key = key.unwrap_or("").to_string(),
                ModeChange::Limit(limit) => chan.user_limit = limit.unwrap_or(0),
                ModeChange::Op(..) | ModeChange::Voice(..) | ModeChange::Ban(..) => {}
            }
        }
        debug!("stored modes {} for channel: {}", chan.mode_string(), channel);
    }

    fn on_nickname_in_use(&mut self, r: &mut Reaction<'_>) {
        warn!("nickname collision detected, changing nickname");

        let prefix = truncate_chars(&self.nickname, COLLISION_PREFIX_LEN).to_string();
        let mut rng = rand::thread_rng();
        let nickname = loop {
            let candidate = format!("{}{}", prefix, rng.gen::<u32>());
            if candidate != self.nickname {
                break candidate;
            }
        };

        self.nickname = nickname.clone();
        r.send(Outbound::critical(Command::Nick(nickname)));
    }
}
