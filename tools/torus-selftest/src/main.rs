use std::env;

use anyhow::{Context, ensure};
use torus::{RingBuffer, RingError};
use tracing::info;

const DEFAULT_CAPACITY: usize = 100_000_000;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    let capacity = match args.get(1) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid capacity {raw:?}"))?,
        None => DEFAULT_CAPACITY,
    };

    smoketest()?;
    wrap_drill()?;
    selftest(capacity)?;

    info!("all drills passed");
    Ok(())
}

/// Minimal round trip on a small buffer.
fn smoketest() -> anyhow::Result<()> {
    ensure!(
        RingBuffer::new(0).is_err(),
        "zero capacity must be rejected"
    );

    let mut ring = RingBuffer::new(10).context("smoketest init")?;
    ring.push(1).context("smoketest push")?;
    let value = ring.pop().context("smoketest pop")?;
    ensure!(value == 1, "expected value 1, got {value}");
    ensure!(ring.is_empty(), "expected empty buffer after round trip");

    info!("smoketest passed");
    Ok(())
}

/// Laps both indices past the end of a capacity-3 store.
fn wrap_drill() -> anyhow::Result<()> {
    let mut ring = RingBuffer::new(3).context("wrap drill init")?;
    for value in [1, 2, 3] {
        ring.push(value).context("wrap drill fill")?;
    }
    ensure!(ring.is_full(), "three elements must fill capacity 3");
    ensure!(
        ring.push(99) == Err(RingError::BufferFull),
        "push on a full buffer must be rejected"
    );

    ensure!(ring.pop() == Ok(1), "expected oldest element first");
    ensure!(ring.remaining() == 1, "expected one free slot after pop");

    ring.push(4).context("wrap drill push past the seam")?;
    for expected in [2, 3, 4] {
        let value = ring.pop().context("wrap drill drain")?;
        ensure!(value == expected, "expected {expected}, got {value}");
    }
    ensure!(ring.is_empty(), "expected empty buffer after drain");

    info!("wrap drill passed");
    Ok(())
}

/// The original self-test sequence, against a large store by default.
fn selftest(capacity: usize) -> anyhow::Result<()> {
    let mut ring = RingBuffer::new(capacity)
        .with_context(|| format!("init with capacity {capacity}"))?;

    ring.push(1).context("first push")?;
    let value = ring.pop().context("first pop")?;
    ensure!(value == 1, "expected value 1, got {value}");
    ensure!(ring.is_empty(), "expected no values, got values");

    ring.push(22).context("push 22")?;
    ring.push(23).context("push 23")?;
    ensure!(
        !ring.is_full(),
        "two elements must not fill a buffer of capacity {capacity}"
    );

    let value = ring.pop().context("pop after refill")?;
    ensure!(value == 22, "expected value 22, got {value}");
    info!("value: {value}");

    let remaining = ring.remaining();
    ensure!(
        remaining == capacity - 1,
        "expected {} free slots, got {remaining}",
        capacity - 1
    );
    info!("remaining: {remaining}");

    ring.destroy();

    info!("selftest passed with capacity {capacity}");
    Ok(())
}
