//! Einstein reductions end to end.
//!
//! This example demonstrates:
//! - Matrix products, traces and transposes from subscript strings
//! - Custom combine/reduce steps with `einreduce`
//! - Axis reductions and broadcasting elementwise math
//! - The builder entry point writing into a preallocated output
//!
//! Run with:
//! ```bash
//! RUST_LOG=einarray_exec=debug cargo run --example einsum
//! ```

use anyhow::Result;
use einarray_core::Tensor;
use einarray_exec::{einreduce, einsum, einsum_ex, exp, matmul, sub, sum, ExecHints, ReduceOp};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== einarray-exec: Einsum ===\n");

    example_basics()?;
    example_custom_reduction()?;
    example_axis_reductions()?;
    example_builder()?;

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

fn example_basics() -> Result<()> {
    println!("--- Example 1: Basics ---");

    let a = Tensor::<f64>::from_nested([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])?;
    let b = Tensor::<f64>::from_nested([[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]])?;

    println!("a @ b = {}", matmul(&a, &b)?);
    println!("a^T = {}", einsum("ij->ji", &[&a])?.into_tensor());
    println!("trace(I3) = {:?}", einsum("ii->", &[&Tensor::<f64>::eye(3)])?.as_scalar());
    println!();
    Ok(())
}

fn example_custom_reduction() -> Result<()> {
    println!("--- Example 2: Custom reduction ---");

    // Min-plus product: c[i,k] = min_j a[i,j] + b[j,k]
    let dist = Tensor::<f64>::from_nested([[0.0, 4.0, 1.0], [4.0, 0.0, 2.0], [1.0, 2.0, 0.0]])?;
    let two_hop = einreduce(
        "ij,jk->ik",
        &[&dist, &dist],
        |xs: &[f64]| xs[0] + xs[1],
        ReduceOp::Min,
        None,
    )?;
    println!("shortest paths of at most two hops = {}", two_hop.into_tensor());
    println!();
    Ok(())
}

fn example_axis_reductions() -> Result<()> {
    println!("--- Example 3: Softmax over rows ---");

    let logits = Tensor::<f64>::from_nested([[1.0, 2.0, 3.0], [1.0, 1.0, 1.0]])?;
    let shifted = sub(&logits, 3.0)?;
    let e = exp(&shifted)?;
    let totals = sum(&e, Some(&[1]))?.into_tensor();
    let totals = Tensor::from_vec(totals.to_vec(), &[2, 1])?;
    let softmax = einarray_exec::div(&e, &totals)?;
    println!("softmax = {softmax}");
    println!();
    Ok(())
}

fn example_builder() -> Result<()> {
    println!("--- Example 4: Builder with output ---");

    let a = Tensor::<i64>::from_vec((0..8).collect(), &[2, 2, 2])?;
    let out = Tensor::<i64>::zeros(&[2, 2, 2]);
    einsum_ex("bij,bjk->bik")
        .inputs(&[&a, &a])
        .hints(&ExecHints::default())
        .out(&out)
        .run()?;
    println!("batched a @ a = {out}");
    Ok(())
}
