use catalog::CatalogStore;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading catalog artifacts...\n");

    let start = Instant::now();
    let store = CatalogStore::load_from_files(data_dir)
        .expect("Failed to load catalog artifacts");
    let elapsed = start.elapsed();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", store.len());
    println!("Matrix entries: {}", store.len() * store.len());

    if let Some(title) = store.titles().next() {
        println!("First title: {}", title);
    }
}
