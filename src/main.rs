// This binary crate is intentionally minimal.
// All pipeline logic lives in the library (src/lib.rs and its modules);
// the browser front-end is the `studio` binary:
//   cargo run --bin studio
fn main() {
    println!("grayscan: a front-end pipeline for image-to-text recognition.");
    println!("Run `cargo run --bin studio` and open the printed URL.");
}
