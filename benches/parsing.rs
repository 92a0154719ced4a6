//! Benchmarks for line parsing, classification and channel syncing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slirc_sync::{classify, ClientConfig, IrcClient, ParsedMessage};

/// Connection-level PING
const SIMPLE_MESSAGE: &str = "PING :irc.example.com";

/// Channel message with a full origin
const PREFIX_MESSAGE: &str = ":nick!user@host PRIVMSG #channel :Hello, world!";

/// Numeric response
const NUMERIC_RESPONSE: &str =
    ":irc.server.net 001 nickname :Welcome to the IRC Network nickname!user@host";

/// WHO reply with a multi-word realname
const WHO_REPLY: &str =
    ":irc.server.net 352 nickname #channel ident host.example.com irc.server.net alice H@ :0 Alice Liddell";

/// CTCP ACTION
const ACTION_MESSAGE: &str = ":nick!user@host PRIVMSG #channel :\x01ACTION waves\x01";

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Message Parsing");

    let messages = [
        ("simple_ping", SIMPLE_MESSAGE),
        ("with_prefix", PREFIX_MESSAGE),
        ("numeric_response", NUMERIC_RESPONSE),
        ("who_reply", WHO_REPLY),
        ("action", ACTION_MESSAGE),
    ];

    for (name, line) in messages {
        group.bench_with_input(BenchmarkId::new("parse", name), line, |b, s| {
            b.iter(|| {
                let msg = ParsedMessage::parse(black_box(s));
                black_box(msg)
            })
        });
    }

    group.finish();
}

fn benchmark_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Classification");

    group.bench_function("privmsg", |b| {
        b.iter(|| black_box(classify(black_box(PREFIX_MESSAGE))))
    });

    group.bench_function("numeric", |b| {
        b.iter(|| black_box(classify(black_box(NUMERIC_RESPONSE))))
    });

    group.finish();
}

fn synced_client(members: usize) -> IrcClient {
    let mut config = ClientConfig::new("me", "Me");
    config.channel_syncing = true;
    let mut client = IrcClient::new(config);
    client.process_line(":me!u@h JOIN :#channel");
    for i in 0..members {
        client.process_line(&format!(":user{}!u@h JOIN :#channel", i));
    }
    client
}

fn benchmark_syncing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Channel Syncing");

    for members in [10usize, 500] {
        group.bench_with_input(
            BenchmarkId::new("channel_message", members),
            &members,
            |b, &n| {
                let mut client = synced_client(n);
                b.iter(|| black_box(client.process_line(black_box(PREFIX_MESSAGE))))
            },
        );

        group.bench_with_input(BenchmarkId::new("join_part", members), &members, |b, &n| {
            let mut client = synced_client(n);
            b.iter(|| {
                client.process_line(":guest!g@h JOIN :#channel");
                black_box(client.process_line(":guest!g@h PART #channel :bye"))
            })
        });

        group.bench_with_input(BenchmarkId::new("nick_change", members), &members, |b, &n| {
            let mut client = synced_client(n);
            b.iter(|| {
                client.process_line(":user0!u@h NICK :renamed");
                black_box(client.process_line(":renamed!u@h NICK :user0"))
            })
        });

        group.bench_with_input(BenchmarkId::new("who_reply", members), &members, |b, &n| {
            let mut client = synced_client(n);
            b.iter(|| black_box(client.process_line(black_box(WHO_REPLY))))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parsing,
    benchmark_classification,
    benchmark_syncing,
);

criterion_main!(benches);
