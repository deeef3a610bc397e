//! Symmetric LDLᵀ factorization with diagonal pivoting
//!
//! Factorizes a symmetric positive semi-definite matrix `A` as `P A Pᵀ = L D Lᵀ`. Every remaining
//! diagonal entry is measured against the original diagonal entry of its own row, the largest of
//! these ratios picks the next pivot. This makes pivoting and rank detection independent of the
//! scale of single columns. Once all ratios vanish the factorization ends and the remaining block
//! counts as zero. Solving with such a factor sets the unknowns of the vanished pivots to zero,
//! which gives a least-squares-consistent solution for rank-deficient gram matrices instead of an
//! error.
#![allow(non_snake_case)]
use lstsq::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};

pub(crate) struct Ldlt<F> {
    /// unit lower triangular factor in pivoted order, zero below the diagonal past `rank`
    L: Array2<F>,
    /// pivots, zero past `rank`
    D: Array1<F>,
    /// `perm[k]` is the row of `A` chosen as `k`-th pivot
    perm: Vec<usize>,
    rank: usize,
}

impl<F: Float> Ldlt<F> {
    /// Factorize the symmetric matrix `A`
    pub fn factorize(mut A: Array2<F>) -> Self {
        let n = A.nrows();
        debug_assert_eq!(n, A.ncols(), "gram matrix has to be square");

        let tolerance = F::epsilon() * F::from_usize(n.max(1)).unwrap_or_else(F::one);

        // original diagonal in pivoted order
        let mut scale = A.diag().mapv(|x| x.abs());
        let relative = |A: &Array2<F>, scale: &Array1<F>, i: usize| {
            if scale[i] > F::zero() {
                A[[i, i]].abs() / scale[i]
            } else {
                F::zero()
            }
        };

        let mut perm: Vec<usize> = (0..n).collect();
        let mut D = Array1::zeros(n);
        let mut rank = n;

        for k in 0..n {
            let pivot = (k + 1..n).fold(k, |best, i| {
                if relative(&A, &scale, i) > relative(&A, &scale, best) {
                    i
                } else {
                    best
                }
            });
            if pivot != k {
                swap_symmetric(&mut A, k, pivot);
                scale.swap(k, pivot);
                perm.swap(k, pivot);
            }

            if relative(&A, &scale, k) <= tolerance {
                rank = k;
                break;
            }
            let d = A[[k, k]];
            D[k] = d;

            // Schur complement of the trailing block, column `k` is still unscaled here
            for i in k + 1..n {
                let a_ik = A[[i, k]] / d;
                if a_ik == F::zero() {
                    continue;
                }
                for j in k + 1..=i {
                    let a_jk = A[[j, k]];
                    A[[i, j]] -= a_ik * a_jk;
                    A[[j, i]] = A[[i, j]];
                }
            }
            for i in k + 1..n {
                A[[i, k]] /= d;
            }
        }

        let mut L = Array2::eye(n);
        for i in 0..n {
            for j in 0..i.min(rank) {
                L[[i, j]] = A[[i, j]];
            }
        }

        Ldlt { L, D, perm, rank }
    }

    /// Numerical rank, the number of pivots above tolerance
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn dim(&self) -> usize {
        self.D.len()
    }

    /// Ratio of the largest to the smallest pivot magnitude, infinite for rank-deficient matrices
    pub fn pivot_ratio(&self) -> F {
        if self.rank < self.dim() {
            return F::infinity();
        }

        let (min, max) = self
            .D
            .iter()
            .fold((F::infinity(), F::zero()), |(min, max), &d| {
                (min.min(d.abs()), max.max(d.abs()))
            });

        if self.dim() == 0 {
            F::one()
        } else {
            max / min
        }
    }

    /// Solve `A X = B` for every column of `B`
    pub fn solve<S: Data<Elem = F>>(&self, B: &ArrayBase<S, Ix2>) -> Array2<F> {
        let n = self.dim();
        debug_assert_eq!(n, B.nrows());

        // Y = P B
        let mut Y = Array2::zeros(B.raw_dim());
        for (k, &p) in self.perm.iter().enumerate() {
            Y.row_mut(k).assign(&B.row(p));
        }

        // L Z = Y
        for i in 1..n {
            let (solved, mut rest) = Y.view_mut().split_at(Axis(0), i);
            let mut row = rest.row_mut(0);
            for j in 0..i.min(self.rank) {
                row.scaled_add(-self.L[[i, j]], &solved.row(j));
            }
        }

        // D W = Z, vanished pivots contribute nothing
        for (i, mut row) in Y.axis_iter_mut(Axis(0)).enumerate() {
            if i < self.rank {
                let d = self.D[i];
                row.mapv_inplace(|v| v / d);
            } else {
                row.fill(F::zero());
            }
        }

        // Lᵀ V = W
        for i in (0..n.saturating_sub(1)).rev() {
            let (mut head, solved) = Y.view_mut().split_at(Axis(0), i + 1);
            let mut row = head.row_mut(i);
            for j in i + 1..n {
                row.scaled_add(-self.L[[j, i]], &solved.row(j - i - 1));
            }
        }

        // X = Pᵀ V
        let mut X = Array2::zeros(Y.raw_dim());
        for (k, &p) in self.perm.iter().enumerate() {
            X.row_mut(p).assign(&Y.row(k));
        }

        X
    }
}

fn swap_symmetric<F: Float>(A: &mut Array2<F>, i: usize, j: usize) {
    for c in 0..A.ncols() {
        A.swap([i, c], [j, c]);
    }
    for r in 0..A.nrows() {
        A.swap([r, i], [r, j]);
    }
}
