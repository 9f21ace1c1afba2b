//! Walks through the basic `Deq` operations, printing the state after each step.
//!
//! Run with `RUST_LOG=trace cargo run --example demo` to see the deque's own
//! trace output as well.

use linked_deq::Deq;

fn print_deq(deq: &Deq<&str>, msg: &str) {
    println!("{}", msg);
    println!("  Deq content: \"{}\"", deq.render());
    println!("  Deq length : {}", deq.len());
}

fn main() -> Result<(), linked_deq::DeqError> {
    env_logger::init();

    println!("=== Simple Deq Demonstration ===\n");

    let mut deq = Deq::new();
    print_deq(&deq, "Start with an empty queue:");

    deq.head_put("Head 1");
    deq.head_put("Head 2");
    deq.tail_put("Tail 1");
    deq.tail_put("Tail 2");
    print_deq(&deq, "After adding Head 2, Head 1 at head and Tail 1, Tail 2 at tail:");

    if let Some(got) = deq.head_get() {
        println!("head_get -> {}", got);
    }
    print_deq(&deq, "After removing one from the head:");

    if let Some(got) = deq.tail_get() {
        println!("tail_get -> {}", got);
    }
    print_deq(&deq, "After removing one from the tail:");

    deq.head_put("NewHead");
    deq.tail_put("NewTail");
    print_deq(&deq, "After adding NewHead at head and NewTail at tail:");

    println!("head_ith(0) -> {}", deq.head_ith(0)?);
    println!("head_ith(1) -> {}", deq.head_ith(1)?);

    match deq.tail_rem(&"NewHead") {
        Some(removed) => println!("tail_rem(\"NewHead\") -> {}", removed),
        None => println!("tail_rem(\"NewHead\") -> (not found)"),
    }
    print_deq(&deq, "After removing \"NewHead\" from the tail side:");

    if let Err(err) = deq.tail_ith(deq.len()) {
        println!("tail_ith({}) -> error: {}", deq.len(), err);
    }

    println!("\nDeleting the queue.");
    deq.destroy();
    println!("Done.");

    Ok(())
}
