//! Basic tensor construction and inspection.
//!
//! Run with:
//! ```bash
//! cargo run --example basic_tensor
//! ```

use anyhow::Result;
use einarray_core::{IndexIter, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    println!("=== einarray-core: Basic Tensors ===\n");

    let t = Tensor::<f64>::from_nested(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])?;
    println!("from nested: {t}");
    println!("  shape = {:?}, rank = {}, len = {}", t.shape(), t.rank(), t.len());

    let z = Tensor::<f32>::zeros(&[2, 2]);
    let o = Tensor::<f32>::ones(&[2, 2]);
    let e = Tensor::<f32>::eye(3);
    println!("zeros: {z}\nones: {o}\neye: {e}");

    let f = Tensor::from_fn(&[3, 3], |idx| (idx[0] * 3 + idx[1]) as i64);
    println!("from_fn: {f}");

    let grid = Tensor::<i64>::indices(&[2, 2])?;
    println!("indices([2, 2]): {grid}");

    let mut rng = StdRng::seed_from_u64(2024);
    let u = Tensor::<f64>::random_uniform_with_rng(&[2, 3], -1.0, 1.0, &mut rng)?;
    let n = Tensor::<f64>::random_normal_with_rng(&[2, 3], 0.0, 1.0, &mut rng)?;
    println!("uniform: {u}\nnormal: {n}");

    println!("\nIndex tuples of [2, 3]:");
    for idx in IndexIter::new(&[2, 3]) {
        println!("  {:?} -> {}", idx, t.get(&idx)?);
    }

    println!("\nRows:");
    for row in t.outer_iter() {
        println!("  {}", row.into_tensor());
    }
    Ok(())
}
