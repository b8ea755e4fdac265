//! Property-based tests for the reduction engine
//!
//! Einsum results are checked against naive loop implementations over random
//! shapes and integer data, so comparisons are exact.

#[cfg(test)]
mod tests {
    use crate::{add, einsum, matmul, mul, sum};
    use einarray_core::Tensor;
    use proptest::prelude::*;

    fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = Tensor<i64>> {
        prop::collection::vec(-20i64..20, rows * cols)
            .prop_map(move |data| Tensor::from_vec(data, &[rows, cols]).unwrap())
    }

    fn matmul_pair() -> impl Strategy<Value = (Tensor<i64>, Tensor<i64>)> {
        (1usize..5, 0usize..5, 1usize..5)
            .prop_flat_map(|(m, k, n)| (matrix(m, k), matrix(k, n)))
    }

    fn naive_matmul(a: &Tensor<i64>, b: &Tensor<i64>) -> Vec<i64> {
        let (m, k, n) = (a.shape()[0], a.shape()[1], b.shape()[1]);
        let mut out = vec![0; m * n];
        for i in 0..m {
            for j in 0..n {
                for p in 0..k {
                    out[i * n + j] += a.get(&[i, p]).unwrap() * b.get(&[p, j]).unwrap();
                }
            }
        }
        out
    }

    proptest! {
        #[test]
        fn prop_einsum_matches_naive_matmul((a, b) in matmul_pair()) {
            let c = matmul(&a, &b).unwrap();
            prop_assert_eq!(c.shape(), &[a.shape()[0], b.shape()[1]]);
            prop_assert_eq!(c.to_vec(), naive_matmul(&a, &b));
        }

        #[test]
        fn prop_transpose_twice_is_identity(a in (1usize..5, 1usize..5).prop_flat_map(|(r, c)| matrix(r, c))) {
            let t = einsum("ij->ji", &[&a]).unwrap().into_tensor();
            let back = einsum("ij->ji", &[&t]).unwrap().into_tensor();
            prop_assert_eq!(back, a);
        }

        #[test]
        fn prop_full_sum_matches_iterator(a in (1usize..5, 0usize..5).prop_flat_map(|(r, c)| matrix(r, c))) {
            let total = sum(&a, None).unwrap().as_scalar().unwrap();
            prop_assert_eq!(total, a.to_vec().iter().sum::<i64>());
            let via_einsum = einsum("ij->", &[&a]).unwrap().as_scalar().unwrap();
            prop_assert_eq!(total, via_einsum);
        }

        #[test]
        fn prop_row_sums_split_total(a in (1usize..5, 1usize..5).prop_flat_map(|(r, c)| matrix(r, c))) {
            let rows = sum(&a, Some(&[1])).unwrap().into_tensor();
            let total = sum(&a, None).unwrap().as_scalar().unwrap();
            prop_assert_eq!(rows.to_vec().iter().sum::<i64>(), total);
        }

        #[test]
        fn prop_elementwise_distributes(a in matrix(3, 3), b in matrix(3, 3), c in matrix(3, 3)) {
            // a * (b + c) == a*b + a*c
            let lhs = mul(&a, add(&b, &c).unwrap()).unwrap();
            let rhs = add(mul(&a, &b).unwrap(), mul(&a, &c).unwrap()).unwrap();
            prop_assert_eq!(lhs, rhs);
        }
    }
}
