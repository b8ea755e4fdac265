//! Slicing views and write-through examples.
//!
//! This example demonstrates:
//! - Python-style slices with negative starts and steps
//! - Integer keys that collapse axes
//! - Writes through a view landing in the original tensor
//! - Broadcast views with stride 0
//!
//! Run with:
//! ```bash
//! RUST_LOG=einarray_core=trace cargo run --example views
//! ```

use anyhow::Result;
use einarray_core::{Key, Slice, Tensor};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== einarray-core: Views ===\n");

    example_slicing()?;
    example_write_through()?;
    example_broadcast()?;

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

fn example_slicing() -> Result<()> {
    println!("--- Example 1: Slicing ---");

    let t = Tensor::<i32>::from_vec((0..12).collect(), &[3, 4])?;
    println!("t = {t}");

    // t[1]
    let row = t.slice(&[1.into()])?;
    println!("t[1]        = {row}    {:?}", row.view());

    // t[:, ::-2]
    let rev = t.slice(&[Key::Full, Slice::new(-1, None, -2)?.into()])?;
    println!("t[:, ::-2]  = {rev}    {:?}", rev.view());

    // t[-2:, 1:3]
    let block = t.slice(&[Slice::from_start(-2).into(), Slice::range(1, 3).into()])?;
    println!("t[-2:, 1:3] = {block}");

    // t[2, 3]
    println!("t[2, 3]     = {:?}", t.select(&[2.into(), 3.into()])?);
    println!();
    Ok(())
}

fn example_write_through() -> Result<()> {
    println!("--- Example 2: Write-through ---");

    let t = Tensor::<f64>::zeros(&[3, 3]);
    let diag_block = t.slice(&[Slice::range(0, 2).into(), Slice::range(0, 2).into()])?;
    diag_block.assign(&[], 1.0)?;
    println!("after t[:2, :2] = 1:\n  {t}");

    let col = t.slice(&[Key::Full, 2.into()])?;
    col.assign(&[], &Tensor::from_vec(vec![7.0, 8.0, 9.0], &[3])?)?;
    println!("after t[:, 2] = [7, 8, 9]:\n  {t}");
    println!("shares buffer: {}", col.shares_buffer(&t));
    println!();
    Ok(())
}

fn example_broadcast() -> Result<()> {
    println!("--- Example 3: Broadcasting ---");

    let col = Tensor::<i32>::from_nested([[1], [2], [3]])?;
    let wide = col.broadcast_to(&[3, 4])?;
    println!("[3, 1] -> [3, 4] = {wide}");
    println!("view: {:?}", wide.view());
    println!("buffer holds {} elements for {} logical ones", wide.buffer_len(), wide.len());
    Ok(())
}
