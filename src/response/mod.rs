//! RFC 2812 numeric reply codes and their message-kind categories.
//!
//! [`Response`] lists every numeric the RFC defines. A code outside this
//! list means the server is not RFC 2812 conformant; a code inside it that
//! has no [`MessageKind`] category is simply not interesting to the engine.
//! Both classify as [`MessageKind::Unknown`], but they log differently.
//!
//! # Reference
//! - RFC 2812 section 5: Replies

#![allow(non_camel_case_types)]

use crate::message::MessageKind;

macro_rules! responses {
    ($( $(#[$doc:meta])* $name:ident = $code:literal, )*) => {
        /// IRC server numeric reply.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        #[non_exhaustive]
        pub enum Response {
            $( $(#[$doc])* $name = $code, )*
        }

        impl Response {
            /// Look up a numeric. Returns `None` for codes RFC 2812 does not define.
            pub fn from_code(code: u16) -> Option<Response> {
                match code {
                    $( $code => Some(Response::$name), )*
                    _ => None,
                }
            }
        }
    };
}

responses! {
    /// 001 - Welcome to the network
    RPL_WELCOME = 1,
    /// 002 - Your host is
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server name, version, modes
    RPL_MYINFO = 4,
    /// 005 - Try another server
    RPL_BOUNCE = 5,

    RPL_TRACELINK = 200,
    RPL_TRACECONNECTING = 201,
    RPL_TRACEHANDSHAKE = 202,
    RPL_TRACEUNKNOWN = 203,
    RPL_TRACEOPERATOR = 204,
    RPL_TRACEUSER = 205,
    RPL_TRACESERVER = 206,
    RPL_TRACESERVICE = 207,
    RPL_TRACENEWTYPE = 208,
    RPL_TRACECLASS = 209,
    RPL_TRACERECONNECT = 210,
    RPL_STATSLINKINFO = 211,
    RPL_STATSCOMMANDS = 212,
    RPL_ENDOFSTATS = 219,
    /// 221 - Your user mode string
    RPL_UMODEIS = 221,
    RPL_SERVLIST = 234,
    RPL_SERVLISTEND = 235,
    RPL_STATSUPTIME = 242,
    RPL_STATSOLINE = 243,
    /// 251 - There are N users on M servers
    RPL_LUSERCLIENT = 251,
    /// 252 - Operators online
    RPL_LUSEROP = 252,
    /// 253 - Unknown connections
    RPL_LUSERUNKNOWN = 253,
    /// 254 - Channels formed
    RPL_LUSERCHANNELS = 254,
    /// 255 - I have N clients and M servers
    RPL_LUSERME = 255,
    RPL_ADMINME = 256,
    RPL_ADMINLOC1 = 257,
    RPL_ADMINLOC2 = 258,
    RPL_ADMINEMAIL = 259,
    RPL_TRACELOG = 261,
    RPL_TRACEEND = 262,
    RPL_TRYAGAIN = 263,

    RPL_AWAY = 301,
    RPL_USERHOST = 302,
    RPL_ISON = 303,
    RPL_UNAWAY = 305,
    RPL_NOWAWAY = 306,
    /// 311 - WHOIS nick user host * :realname
    RPL_WHOISUSER = 311,
    /// 312 - WHOIS server
    RPL_WHOISSERVER = 312,
    /// 313 - WHOIS operator
    RPL_WHOISOPERATOR = 313,
    /// 314 - WHOWAS nick user host * :realname
    RPL_WHOWASUSER = 314,
    /// 315 - End of WHO list
    RPL_ENDOFWHO = 315,
    /// 317 - WHOIS idle seconds
    RPL_WHOISIDLE = 317,
    /// 318 - End of WHOIS
    RPL_ENDOFWHOIS = 318,
    /// 319 - WHOIS channel list
    RPL_WHOISCHANNELS = 319,
    /// 321 - LIST header (obsolete)
    RPL_LISTSTART = 321,
    /// 322 - LIST entry
    RPL_LIST = 322,
    /// 323 - End of LIST
    RPL_LISTEND = 323,
    /// 324 - Channel mode snapshot
    RPL_CHANNELMODEIS = 324,
    RPL_UNIQOPIS = 325,
    /// 331 - No topic is set
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    RPL_INVITING = 341,
    RPL_SUMMONING = 342,
    RPL_INVITELIST = 346,
    RPL_ENDOFINVITELIST = 347,
    RPL_EXCEPTLIST = 348,
    RPL_ENDOFEXCEPTLIST = 349,
    RPL_VERSION = 351,
    /// 352 - WHO entry
    RPL_WHOREPLY = 352,
    /// 353 - NAMES entry
    RPL_NAMREPLY = 353,
    RPL_LINKS = 364,
    RPL_ENDOFLINKS = 365,
    /// 366 - End of NAMES
    RPL_ENDOFNAMES = 366,
    /// 367 - Ban list entry
    RPL_BANLIST = 367,
    /// 368 - End of ban list
    RPL_ENDOFBANLIST = 368,
    /// 369 - End of WHOWAS
    RPL_ENDOFWHOWAS = 369,
    RPL_INFO = 371,
    /// 372 - MOTD line
    RPL_MOTD = 372,
    RPL_ENDOFINFO = 374,
    /// 375 - MOTD start
    RPL_MOTDSTART = 375,
    /// 376 - End of MOTD
    RPL_ENDOFMOTD = 376,
    RPL_YOUREOPER = 381,
    RPL_REHASHING = 382,
    RPL_YOURESERVICE = 383,
    RPL_TIME = 391,
    RPL_USERSSTART = 392,
    RPL_USERS = 393,
    RPL_ENDOFUSERS = 394,
    RPL_NOUSERS = 395,

    ERR_NOSUCHNICK = 401,
    ERR_NOSUCHSERVER = 402,
    ERR_NOSUCHCHANNEL = 403,
    ERR_CANNOTSENDTOCHAN = 404,
    ERR_TOOMANYCHANNELS = 405,
    ERR_WASNOSUCHNICK = 406,
    ERR_TOOMANYTARGETS = 407,
    ERR_NOSUCHSERVICE = 408,
    ERR_NOORIGIN = 409,
    ERR_NORECIPIENT = 411,
    ERR_NOTEXTTOSEND = 412,
    ERR_NOTOPLEVEL = 413,
    ERR_WILDTOPLEVEL = 414,
    ERR_BADMASK = 415,
    ERR_UNKNOWNCOMMAND = 421,
    ERR_NOMOTD = 422,
    ERR_NOADMININFO = 423,
    ERR_FILEERROR = 424,
    ERR_NONICKNAMEGIVEN = 431,
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE = 433,
    ERR_NICKCOLLISION = 436,
    ERR_UNAVAILRESOURCE = 437,
    ERR_USERNOTINCHANNEL = 441,
    ERR_NOTONCHANNEL = 442,
    ERR_USERONCHANNEL = 443,
    ERR_NOLOGIN = 444,
    ERR_SUMMONDISABLED = 445,
    ERR_USERSDISABLED = 446,
    /// 451 - You have not registered
    ERR_NOTREGISTERED = 451,
    ERR_NEEDMOREPARAMS = 461,
    ERR_ALREADYREGISTRED = 462,
    ERR_NOPERMFORHOST = 463,
    ERR_PASSWDMISMATCH = 464,
    ERR_YOUREBANNEDCREEP = 465,
    ERR_YOUWILLBEBANNED = 466,
    ERR_KEYSET = 467,
    ERR_CHANNELISFULL = 471,
    ERR_UNKNOWNMODE = 472,
    ERR_INVITEONLYCHAN = 473,
    ERR_BANNEDFROMCHAN = 474,
    ERR_BADCHANNELKEY = 475,
    ERR_BADCHANMASK = 476,
    ERR_NOCHANMODES = 477,
    ERR_BANLISTFULL = 478,
    ERR_NOPRIVILEGES = 481,
    ERR_CHANOPRIVSNEEDED = 482,
    ERR_CANTKILLSERVER = 483,
    ERR_RESTRICTED = 484,
    ERR_UNIQOPPRIVSNEEDED = 485,
    ERR_NOOPERHOST = 491,
    ERR_UMODEUNKNOWNFLAG = 501,
    ERR_USERSDONTMATCH = 502,
}

impl Response {
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Parse a three-digit command token such as `"353"`.
    pub fn from_token(token: &str) -> Option<Response> {
        if token.len() != 3 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        token.parse().ok().and_then(Response::from_code)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.code())
    }

    /// The message-kind category this numeric belongs to, if any.
    pub fn kind(&self) -> Option<MessageKind> {
        use Response::*;

        Some(match self {
            RPL_WELCOME | RPL_YOURHOST | RPL_CREATED | RPL_MYINFO => MessageKind::Login,
            RPL_LUSERCLIENT | RPL_LUSEROP | RPL_LUSERUNKNOWN | RPL_LUSERCHANNELS
            | RPL_LUSERME => MessageKind::Info,
            RPL_MOTDSTART | RPL_MOTD | RPL_ENDOFMOTD => MessageKind::Motd,
            RPL_NAMREPLY | RPL_ENDOFNAMES => MessageKind::Names,
            RPL_WHOREPLY | RPL_ENDOFWHO => MessageKind::Who,
            RPL_LISTSTART | RPL_LIST | RPL_LISTEND => MessageKind::List,
            RPL_BANLIST | RPL_ENDOFBANLIST => MessageKind::BanList,
            RPL_TOPIC | RPL_NOTOPIC => MessageKind::Topic,
            RPL_WHOISUSER | RPL_WHOISSERVER | RPL_WHOISOPERATOR | RPL_WHOISIDLE
            | RPL_ENDOFWHOIS | RPL_WHOISCHANNELS => MessageKind::Whois,
            RPL_WHOWASUSER | RPL_ENDOFWHOWAS => MessageKind::Whowas,
            RPL_UMODEIS => MessageKind::UserMode,
            RPL_CHANNELMODEIS => MessageKind::ChannelMode,
            ERR_NICKNAMEINUSE | ERR_NOTREGISTERED => MessageKind::Error,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_roundtrip() {
        for code in [1u16, 221, 324, 352, 353, 433, 502] {
            let resp = Response::from_code(code).unwrap();
            assert_eq!(resp.code(), code);
        }
        assert!(Response::from_code(999).is_none());
        assert!(Response::from_code(6).is_none());
    }

    #[test]
    fn test_from_token_requires_three_digits() {
        assert_eq!(Response::from_token("001"), Some(Response::RPL_WELCOME));
        assert_eq!(Response::from_token("1"), None);
        assert_eq!(Response::from_token("PRIVMSG"), None);
        assert_eq!(Response::from_token("0001"), None);
    }

    #[test]
    fn test_categories() {
        assert_eq!(Response::RPL_WELCOME.kind(), Some(MessageKind::Login));
        assert_eq!(Response::RPL_MYINFO.kind(), Some(MessageKind::Login));
        assert_eq!(Response::RPL_BOUNCE.kind(), None);
        assert_eq!(Response::RPL_LUSERME.kind(), Some(MessageKind::Info));
        assert_eq!(Response::RPL_MOTD.kind(), Some(MessageKind::Motd));
        assert_eq!(Response::RPL_ENDOFNAMES.kind(), Some(MessageKind::Names));
        assert_eq!(Response::RPL_ENDOFWHO.kind(), Some(MessageKind::Who));
        assert_eq!(Response::RPL_LIST.kind(), Some(MessageKind::List));
        assert_eq!(Response::RPL_BANLIST.kind(), Some(MessageKind::BanList));
        assert_eq!(Response::RPL_NOTOPIC.kind(), Some(MessageKind::Topic));
        assert_eq!(Response::RPL_WHOISIDLE.kind(), Some(MessageKind::Whois));
        assert_eq!(Response::RPL_ENDOFWHOWAS.kind(), Some(MessageKind::Whowas));
        assert_eq!(Response::RPL_UMODEIS.kind(), Some(MessageKind::UserMode));
        assert_eq!(Response::RPL_CHANNELMODEIS.kind(), Some(MessageKind::ChannelMode));
        assert_eq!(Response::ERR_NOTREGISTERED.kind(), Some(MessageKind::Error));
        assert_eq!(Response::ERR_NOSUCHNICK.kind(), None);
    }

    #[test]
    fn test_display_zero_padded() {
        assert_eq!(Response::RPL_WELCOME.to_string(), "001");
        assert!(Response::ERR_NICKNAMEINUSE.is_error());
        assert!(!Response::RPL_TOPIC.is_error());
    }
}
