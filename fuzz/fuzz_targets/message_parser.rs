//! Fuzz target for line parsing and channel syncing
//!
//! Feeds arbitrary input through the parser and a synced client. Neither
//! may panic, whatever the server sends.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_sync::{ClientConfig, IrcClient, ParsedMessage};
use std::str;

fuzz_target!(|data: &[u8]| {
    // Only fuzz valid UTF-8 strings to focus on protocol-level issues
    if let Ok(input) = str::from_utf8(data) {
        if input.len() > 8191 {
            return;
        }

        let mut config = ClientConfig::new("me", "Me");
        config.channel_syncing = true;
        config.auto_rejoin = true;
        let mut client = IrcClient::new(config);
        client.process_line(":me!u@h JOIN :#chan");

        for line in input.split(['\r', '\n']) {
            let _ = ParsedMessage::parse(line);
            let _ = client.process_line(line);
        }
    }
});
