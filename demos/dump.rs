//! Object-graph dumping example.
//!
//! Run with: `cargo run --example dump`
#![allow(clippy::unwrap_used)]

use bigdecimal::BigDecimal;
use chrono::{FixedOffset, TimeZone};
use tracing_subscriber::EnvFilter;
use treedump::serial::{serialize, serialize_with_options, SerializeOptions};
use treedump::{build_named, Composite, Member, NameHint, Sequence, Value};
use uuid::Uuid;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let placed = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 6, 15, 14, 30, 0)
        .unwrap();
    let total: BigDecimal = "148.50".parse().unwrap();

    let order = Composite::new("Order")
        .property(Member::new("Id", Uuid::new_v4()))
        .property(Member::new("Placed", placed))
        .property(Member::new("Status", Value::enumeration("OrderStatus", 1)))
        .property(Member::optional("Note", None::<&str>))
        .property(Member::new(
            "Items",
            Sequence::new("Vec")
                .hint(NameHint::root("LineItems"))
                .element(
                    Composite::new("LineItem")
                        .property(Member::new("Sku", "BK-102"))
                        .property(Member::new("Qty", 2u32)),
                )
                .element(
                    Composite::new("LineItem")
                        .property(Member::new("Sku", "BK-447"))
                        .property(Member::new("Qty", 1u32)),
                ),
        ))
        .field(Member::new("Total", total));

    let tree = build_named(Some(&Value::from(order)), "Order")
        .unwrap()
        .unwrap();

    println!("=== Compact ===");
    println!("{}", serialize(&tree));

    println!("\n=== Pretty ===");
    print!(
        "{}",
        serialize_with_options(
            &tree,
            &SerializeOptions::default().indent(true).declaration(true)
        )
    );
}
