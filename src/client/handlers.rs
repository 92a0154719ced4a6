//! Handlers for textual commands and connection-level lines.

use tracing::{debug, warn};

use super::{IrcClient, Reaction};
use crate::casemap::irc_eq;
use crate::chan::ChannelExt;
use crate::command::{Command, Outbound};
use crate::ctcp::{self, Ctcp};
use crate::event::IrcEvent;
use crate::message::{MessageKind, ParsedMessage};
use crate::mode::{scan_channel_modes, ModeChange};
use crate::util::strip_colon;

/// Set `slot` from `value` unless it already holds something.
fn fill(slot: &mut Option<String>, value: Option<&str>) {
    if slot.is_none() {
        *slot = value.map(str::to_string);
    }
}

impl IrcClient {
    pub(super) fn handle_command<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        match msg.command.to_ascii_uppercase().as_str() {
            "PRIVMSG" => self.on_privmsg(msg, r),
            "NOTICE" => self.on_notice(msg, r),
            "JOIN" => self.on_join(msg, r),
            "PART" => self.on_part(msg, r),
            "KICK" => self.on_kick(msg, r),
            "QUIT" => self.on_quit(msg, r),
            "TOPIC" => self.on_topic(msg, r),
            "NICK" => self.on_nick(msg, r),
            "INVITE" => self.on_invite(msg, r),
            "MODE" => self.on_mode(msg, r),
            _ => {}
        }
    }

    pub(super) fn handle_connection_line<'a>(
        &mut self,
        msg: &ParsedMessage<'a>,
        r: &mut Reaction<'a>,
    ) {
        match msg.command.to_ascii_uppercase().as_str() {
            "PING" => {
                let payload = msg
                    .trailing
                    .or_else(|| msg.token(1).map(strip_colon))
                    .unwrap_or("");
                debug!("ping? pong!");
                r.send(Outbound::critical(Command::Pong(payload.to_string())));
                r.emit(IrcEvent::Ping { payload });
            }
            "ERROR" => r.emit(IrcEvent::Error {
                message: msg.trailing,
            }),
            _ => {}
        }
    }

    fn on_join<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let (Some(nick), Some(channel)) = (msg.nick, msg.channel) else {
            return;
        };
        let me = self.is_me(nick);

        if me && !self.joined.iter().any(|c| irc_eq(c, channel)) {
            self.joined.push(channel.to_string());
        }

        if self.config.channel_syncing {
            if me {
                debug!("joining channel: {}", channel);
                self.state.add_channel(channel);
                r.send(Outbound::medium(Command::ModeQuery(channel.to_string())));
                r.send(Outbound::medium(Command::Who(channel.to_string())));
                r.send(Outbound::medium(Command::BanListQuery(channel.to_string())));
            } else {
                r.send(Outbound::medium(Command::Who(nick.to_string())));
            }

            debug!("{} joins channel: {}", nick, channel);
            let added = self.state.add_member(channel, nick).map(|_| ());
            match added {
                Ok(()) => {
                    if let Ok(user) = self.state.user_mut(nick) {
                        fill(&mut user.ident, msg.ident);
                        fill(&mut user.host, msg.host);
                    }
                }
                Err(e) => warn!("ignoring join of {}: {}", nick, e),
            }
        }

        r.emit(IrcEvent::Join { channel, nick });
    }

    fn on_part<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let (Some(nick), Some(channel)) = (msg.nick, msg.channel) else {
            return;
        };
        self.leave(channel, nick);
        r.emit(IrcEvent::Part {
            channel,
            nick,
            reason: msg.trailing,
        });
    }

    fn on_kick<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let (Some(channel), Some(victim)) = (msg.channel, msg.token(3)) else {
            return;
        };
        let kicker = msg.nick.or(msg.from).unwrap_or("");
        let me = self.is_me(victim);

        self.leave(channel, victim);

        if me && self.config.auto_rejoin {
            debug!("rejoining {} after kick", channel);
            r.send(Outbound::high(Command::Join(channel.to_string())));
        }

        r.emit(IrcEvent::Kick {
            channel,
            victim,
            kicker,
            reason: msg.trailing,
        });
    }

    /// Shared PART/KICK bookkeeping.
    fn leave(&mut self, channel: &str, nick: &str) {
        let me = self.is_me(nick);
        if me {
            self.joined.retain(|c| !irc_eq(c, channel));
        }

        if !self.config.channel_syncing {
            return;
        }
        let result = if me {
            debug!("parting channel: {}", channel);
            self.state.remove_channel(channel).map(|_| ())
        } else {
            debug!("{} parts channel: {}", nick, channel);
            self.state.remove_member(channel, nick).map(|_| ())
        };
        if let Err(e) = result {
            warn!("ignoring departure of {}: {}", nick, e);
        }
    }

    fn on_quit<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let Some(nick) = msg.nick else {
            return;
        };

        if self.is_me(nick) {
            self.joined.clear();
        }

        if self.config.channel_syncing {
            let left = self.state.remove_user(nick);
            debug!("{} quits, leaving {} tracked channels", nick, left.len());
        }

        r.emit(IrcEvent::Quit {
            nick,
            reason: msg.trailing,
        });
    }

    fn on_privmsg<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let Some(text) = msg.trailing else {
            return;
        };
        let sender = msg.nick.or(msg.from).unwrap_or("");

        match msg.kind {
            MessageKind::ChannelMessage => {
                if let Some(channel) = msg.channel {
                    r.emit(IrcEvent::ChannelMessage {
                        channel,
                        nick: sender,
                        text,
                    });
                }
            }
            MessageKind::ChannelAction => {
                if let (Some(channel), Some(text)) = (msg.channel, ctcp::action_text(text)) {
                    r.emit(IrcEvent::ChannelAction {
                        channel,
                        nick: sender,
                        text,
                    });
                }
            }
            MessageKind::QueryMessage => r.emit(IrcEvent::QueryMessage { nick: sender, text }),
            MessageKind::QueryAction => {
                if let Some(text) = ctcp::action_text(text) {
                    r.emit(IrcEvent::QueryAction { nick: sender, text });
                }
            }
            MessageKind::CtcpRequest => {
                let Some(request) = Ctcp::parse(text) else {
                    return;
                };
                if let Some(body) = request.reply(self.config.ctcp_version.as_deref()) {
                    if !sender.is_empty() {
                        r.send(Outbound::medium(Command::CtcpReply {
                            target: sender.to_string(),
                            body,
                        }));
                    }
                }
                r.emit(IrcEvent::CtcpRequest {
                    nick: sender,
                    command: request.kind.command(),
                    params: request.params,
                });
            }
            _ => {}
        }
    }

    fn on_notice<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let Some(text) = msg.trailing else {
            return;
        };

        match msg.kind {
            MessageKind::ChannelNotice => {
                if let Some(channel) = msg.token(2) {
                    r.emit(IrcEvent::ChannelNotice {
                        channel,
                        nick: msg.nick,
                        text,
                    });
                }
            }
            MessageKind::QueryNotice => r.emit(IrcEvent::QueryNotice {
                nick: msg.nick,
                text,
            }),
            MessageKind::CtcpReply => {
                if let Some(reply) = Ctcp::parse(text) {
                    r.emit(IrcEvent::CtcpReply {
                        nick: msg.nick,
                        command: reply.kind.command(),
                        params: reply.params,
                    });
                }
            }
            _ => {}
        }
    }

    fn on_topic<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let (Some(channel), Some(topic)) = (msg.channel, msg.trailing) else {
            return;
        };
        let nick = msg.nick.or(msg.from).unwrap_or("");

        if self.config.channel_syncing && self.is_joined(channel) {
            if let Ok(chan) = self.state.channel_mut(channel) {
                chan.topic = topic.to_string();
                debug!("stored topic for channel: {}", channel);
            }
        }

        r.emit(IrcEvent::TopicChange {
            channel,
            nick,
            topic,
        });
    }

    fn on_nick<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let (Some(old), Some(new)) = (msg.nick, msg.token(2).map(strip_colon)) else {
            return;
        };

        if self.is_me(old) {
            self.nickname = new.to_string();
        }

        if self.config.channel_syncing {
            match self.state.rename_user(old, new) {
                Ok(_) => debug!("updated nickname of: {} to: {}", old, new),
                Err(e) => warn!("ignoring nick change {} -> {}: {}", old, new, e),
            }
        }

        r.emit(IrcEvent::NickChange { old, new });
    }

    fn on_invite<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let (Some(inviter), Some(channel)) = (msg.nick, msg.token(3).map(strip_colon)) else {
            return;
        };
        r.emit(IrcEvent::Invite { channel, inviter });
    }

    fn on_mode<'a>(&mut self, msg: &ParsedMessage<'a>, r: &mut Reaction<'a>) {
        let (Some(target), Some(modes)) = (msg.token(2), msg.token(3)) else {
            return;
        };

        if self.is_me(target) {
            self.usermode = strip_colon(modes).to_string();
            debug!("usermode now: {}", self.usermode);
        } else if target.is_channel_name() {
            self.apply_channel_modes(msg, target, modes, r);
        }

        r.emit(IrcEvent::ModeChange { target });
    }

    fn apply_channel_modes<'a>(
        &mut self,
        msg: &ParsedMessage<'a>,
        channel: &'a str,
        modes: &str,
        r: &mut Reaction<'a>,
    ) {
        let params = msg.tokens.get(4..).unwrap_or(&[]);
        let scan = scan_channel_modes(modes, params);
        for err in &scan.errors {
            warn!("mode change on {}: {}", channel, err);
        }

        let actor = msg.nick.or(msg.from).unwrap_or("");
        let mut chan = if self.config.channel_syncing {
            match self.state.channel_mut(channel) {
                Ok(chan) => Some(chan),
                Err(e) => {
                    warn!("not applying modes: {}", e);
                    None
                }
            }
        } else {
            None
        };

        for change in scan.changes {
            match change {
                ModeChange::Op(dir, target) => {
                    if let Some(chan) = chan.as_deref_mut() {
                        match chan.member_mut(target) {
                            Ok(member) => {
                                member.op = dir.is_add();
                                debug!("op {} = {} on {}", target, member.op, channel);
                            }
                            Err(e) => warn!("{}", e),
                        }
                    }
                    r.emit(if dir.is_add() {
                        IrcEvent::Op {
                            channel,
                            actor,
                            target,
                        }
                    } else {
                        IrcEvent::Deop {
                            channel,
                            actor,
                            target,
                        }
                    });
                }
                ModeChange::Voice(dir, target) => {
                    if let Some(chan) = chan.as_deref_mut() {
                        match chan.member_mut(target) {
                            Ok(member) => {
                                member.voice = dir.is_add();
                                debug!("voice {} = {} on {}", target, member.voice, channel);
                            }
                            Err(e) => warn!("{}", e),
                        }
                    }
                    r.emit(if dir.is_add() {
                        IrcEvent::Voice {
                            channel,
                            actor,
                            target,
                        }
                    } else {
                        IrcEvent::Devoice {
                            channel,
                            actor,
                            target,
                        }
                    });
                }
                ModeChange::Ban(dir, mask) => {
                    if let Some(chan) = chan.as_deref_mut() {
                        chan.set_ban(mask, dir.is_add());
                        debug!("ban {} = {} on {}", mask, dir.is_add(), channel);
                    }
                    r.emit(if dir.is_add() {
                        IrcEvent::Ban {
                            channel,
                            actor,
                            mask,
                        }
                    } else {
                        IrcEvent::Unban {
                            channel,
                            actor,
                            mask,
                        }
                    });
                }
                ModeChange::Limit(limit) => {
                    if let Some(chan) = chan.as_deref_mut() {
                        chan.user_limit = limit.unwrap_or(0);
                        debug!("stored user limit for: {}", channel);
                    }
                }
                ModeChange::Key(key) => {
                    if let Some(chan) = chan.as_deref_mut() {
                        chan.key = key.unwrap_or("").to_string();
                        debug!("stored channel key for: {}", channel);
                    }
                }
                ModeChange::Flag(dir, letter) => {
                    if let Some(chan) = chan.as_deref_mut() {
                        chan.set_flag(letter, dir.is_add());
                    }
                }
            }
        }
    }
}
