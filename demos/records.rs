//! Writes a small mixed archive, then scans it back, skipping over a corrupt record.
//!
//! Run with `RUST_LOG=warn cargo run --example records` to see the failure being logged.

use kaldi_holder::{Holder, Int32VectorHolder, Mode, RecordReader, TokenHolder};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut archive = Vec::new();
    TokenHolder::write(&mut archive, Mode::Text, &"spk1".to_string()).unwrap();
    Int32VectorHolder::write(&mut archive, Mode::Binary, &vec![3, 1, 4, 1, 5]).unwrap();
    archive.extend_from_slice(b"1 2 oops\n");
    Int32VectorHolder::write(&mut archive, Mode::Text, &vec![9, 2, 6]).unwrap();

    let mut reader = RecordReader::new(&archive[..]);

    let mut speaker = TokenHolder::default();
    speaker.read(&mut reader).unwrap();
    println!("speaker: {}", speaker.value());

    let mut holder = Int32VectorHolder::default();
    while !reader.at_end().unwrap() {
        match holder.read(&mut reader) {
            Ok(()) => println!("record: {:?}", holder.value()),
            Err(err) => println!("skipped: {}", err),
        }
    }
}
