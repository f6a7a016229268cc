//! Builds the classic he/she/his/hers dictionary and scans a few texts.

use std::collections::BTreeMap;

use acdat::AhoCorasickDoubleArrayTrie;

fn main() {
    let mut dict = BTreeMap::new();
    for key in ["hers", "his", "she", "he"] {
        dict.insert(key.to_string(), key.to_string());
    }

    let acdat = match AhoCorasickDoubleArrayTrie::build(dict) {
        Ok(acdat) => acdat,
        Err(err) => {
            eprintln!("build failed ({}): {err}", err.code());
            std::process::exit(1);
        }
    };

    println!("{acdat:?}");
    println!(
        "size {} occupied {} keywords {}",
        acdat.size(),
        acdat.nonzero_size(),
        acdat.len()
    );
    println!("get his = {:?}", acdat.get("his"));

    for text in ["u2342hers", "ushers", "世界 she said"] {
        println!("{text}:");
        for hit in acdat.find_iter(text) {
            println!("  {hit}");
        }
    }
}
