//! 桥接层性能基准测试
//!
//! 测试帧解码、通道吞吐和端到端消息投递的性能

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dragon_bridge::channel::channel;
use dragon_bridge::{Bridge, BridgeConfig, ChannelConfig, OverflowPolicy, ScriptedEngine};
use dragon_bridge_sys::{decode_slice, Message};
use std::hint::black_box;
use std::sync::Arc;
use std::thread;

fn bench_frame_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_decode");

    for size in [16usize, 256, 4096] {
        let buffer = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &buffer, |b, buffer| {
            b.iter(|| black_box(decode_slice(buffer.len() as i32, black_box(buffer))));
        });
    }

    group.finish();
}

fn bench_channel_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_throughput");
    let count = 10_000u64;
    group.throughput(Throughput::Elements(count));

    let configs = [
        ("unbounded", ChannelConfig::unbounded()),
        ("bounded_block", ChannelConfig::bounded(256, OverflowPolicy::Block)),
        ("bounded_drop_oldest", ChannelConfig::bounded(256, OverflowPolicy::DropOldest)),
    ];

    for (name, config) in configs {
        group.bench_function(name, |b| {
            b.iter(|| {
                let (sender, receiver) = channel(&config);
                let producer = thread::spawn(move || {
                    for _ in 0..count {
                        sender.push(Message::from("tick"));
                    }
                });
                let mut received = 0u64;
                while receiver.pop().is_ok() {
                    received += 1;
                }
                let _ = producer.join();
                black_box(received)
            });
        });
    }

    group.finish();
}

fn bench_end_to_end_delivery(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end_delivery");

    for count in [100usize, 1_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let engine = Arc::new(ScriptedEngine::new());
                let mut bridge = Bridge::new(engine.clone(), BridgeConfig::default());
                if bridge.init().is_err() {
                    return 0;
                }
                let mut delivered = 0usize;
                let _ = bridge.on_message(|message| {
                    black_box(message.len());
                    Ok(())
                });
                engine.script((0..count).map(|i| format!(r#"{{"seq":{}}}"#, i)));
                engine.push_shutdown();
                if let Ok(report) = bridge.run_until_stopped() {
                    delivered = report.delivered;
                }
                black_box(delivered)
            });
        });
    }

    group.finish();
}

fn bench_send_command(c: &mut Criterion) {
    let engine = Arc::new(ScriptedEngine::new().tokenless());
    let bridge = Bridge::new(engine, BridgeConfig::default());
    let _ = bridge.init();

    c.bench_function("send_command", |b| {
        b.iter(|| black_box(bridge.send_command("set", r#"{"gain":0.5}"#)));
    });
}

criterion_group!(
    benches,
    bench_frame_decode,
    bench_channel_throughput,
    bench_end_to_end_delivery,
    bench_send_command
);
criterion_main!(benches);
