//! A tour of einarray through the facade crate.
//!
//! Run with:
//! ```bash
//! EINARRAY_LOG_FORMAT=json RUST_LOG=einarray_exec=debug \
//!     cargo run -p einarray --features tracing --example quickstart
//! ```

use anyhow::Result;
use einarray::prelude::*;
use einarray::tracing_support::init_tracing;

fn main() -> Result<()> {
    init_tracing(None)?;

    let a = array([[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]])?;
    println!("a = {a}");

    // Column view, written through
    let last = a.slice(&[Key::Full, Key::Index(-1)])?;
    last.assign(&[], 0.0)?;
    println!("after zeroing the last column: {a}");

    // Broadcasting
    let scaled = mul(&a, array([1.0f64, 10.0, 100.0])?)?;
    println!("scaled columns = {scaled}");

    // Reductions
    let gram = einsum("ij,kj->ik", &[&a, &a])?.into_tensor();
    println!("a a^T = {gram}");
    println!("row max = {}", max(&a, Some(&[1]))?.into_tensor());
    println!("total = {:?}", sum(&a, None)?.as_scalar());

    Ok(())
}
