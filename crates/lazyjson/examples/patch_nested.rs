//! Example of patching a nested value and resyncing its ancestors.
//!
//! cargo run --package lazyjson --example patch_nested

use lazyjson::{Error, parse_str};

fn main() -> Result<(), Error> {
    let mut root = parse_str(r#"{"users": [{"name": "Amy"}, {"name": "Bob"}]}"#);

    // node = root["users"]
    let Some(users) = root.try_object()?.get_mut("users") else {
        return Ok(());
    };

    // node = root["users"][1]
    let Some(bob) = users.try_array()?.get_mut(1) else {
        return Ok(());
    };

    // node = root["users"][1]["name"]
    if let Some(name) = bob.get_mut("name") {
        println!("before: {}", name.try_string()?);
        name.set_string("Robert");
    }

    // Bubble the change up: the leaf's parent first, then each ancestor.
    bob.set();
    users.set();
    root.set();

    println!("after:  {root}");
    Ok(())
}
