// crates/sgs_physics/src/fields/ops.rs

//! 场代数运算
//!
//! 加减要求量纲一致；乘除组合量纲。标量场可与任意类型的场相乘。

use glam::DMat3;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{Field, FieldValue, ScalarField, SymmTensor, SymmTensorField, TensorField, VectorField};

impl<T: FieldValue> Add<&Field<T>> for &Field<T> {
    type Output = Field<T>;

    #[track_caller]
    fn add(self, rhs: &Field<T>) -> Field<T> {
        self.dimensions.assert_same(&rhs.dimensions, "add");
        self.zip_map(
            rhs,
            format!("({} + {})", self.name, rhs.name),
            self.dimensions,
            |a, b| a + b,
        )
    }
}

impl<T: FieldValue> Sub<&Field<T>> for &Field<T> {
    type Output = Field<T>;

    #[track_caller]
    fn sub(self, rhs: &Field<T>) -> Field<T> {
        self.dimensions.assert_same(&rhs.dimensions, "subtract");
        self.zip_map(
            rhs,
            format!("({} - {})", self.name, rhs.name),
            self.dimensions,
            |a, b| a - b,
        )
    }
}

impl<T: FieldValue> Mul<f64> for &Field<T> {
    type Output = Field<T>;

    fn mul(self, s: f64) -> Field<T> {
        self.map(format!("{}*{}", s, self.name), self.dimensions, |v| v * s)
    }
}

impl<T: FieldValue> Neg for &Field<T> {
    type Output = Field<T>;

    fn neg(self) -> Field<T> {
        self.map(format!("-{}", self.name), self.dimensions, |v| v * -1.0)
    }
}

/// 标量场 × 任意场
impl<T: FieldValue> Mul<&Field<T>> for &ScalarField {
    type Output = Field<T>;

    #[track_caller]
    fn mul(self, rhs: &Field<T>) -> Field<T> {
        self.zip_map(
            rhs,
            format!("{}*{}", self.name, rhs.name),
            self.dimensions * rhs.dimensions,
            |a, b| b * a,
        )
    }
}

impl Div<&ScalarField> for &ScalarField {
    type Output = ScalarField;

    #[track_caller]
    fn div(self, rhs: &ScalarField) -> ScalarField {
        self.zip_map(
            rhs,
            format!("{}/{}", self.name, rhs.name),
            self.dimensions / rhs.dimensions,
            |a, b| a / b,
        )
    }
}

// ========== 标量场 ==========

impl ScalarField {
    /// 平方
    pub fn sqr(&self) -> ScalarField {
        self.map(
            format!("sqr({})", self.name),
            self.dimensions * self.dimensions,
            |x| x * x,
        )
    }

    /// 平方根
    pub fn sqrt(&self) -> ScalarField {
        self.map(format!("sqrt({})", self.name), self.dimensions.sqrt(), f64::sqrt)
    }

    /// 实数次幂
    pub fn powf(&self, p: f64) -> ScalarField {
        self.map(
            format!("pow({},{})", self.name, p),
            self.dimensions.powf(p),
            |x| x.powf(p),
        )
    }

    /// 逐点最大值
    #[track_caller]
    pub fn max_field(&self, other: &ScalarField) -> ScalarField {
        self.dimensions.assert_same(&other.dimensions, "max");
        self.zip_map(
            other,
            format!("max({},{})", self.name, other.name),
            self.dimensions,
            f64::max,
        )
    }

    /// 以 `floor` 为下限逐点截断，同时返回被截断的元素数
    #[track_caller]
    pub fn clip_min(&self, floor: &ScalarField) -> (ScalarField, usize) {
        let clipped = self.max_field(floor);
        let count = self
            .values
            .iter()
            .zip(floor.values.iter())
            .filter(|&(&v, &f)| v < f || v.is_nan())
            .count();
        (clipped, count)
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// 算术平均
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// 加权平均（如体积加权）
    pub fn weighted_mean(&self, weights: &[f64]) -> f64 {
        let (sum, total) = self
            .values
            .iter()
            .zip(weights.iter())
            .fold((0.0, 0.0), |(s, w), (&x, &wi)| (s + x * wi, w + wi));
        if total > 0.0 {
            sum / total
        } else {
            0.0
        }
    }
}

// ========== 向量场 ==========

impl VectorField {
    /// 模平方 `U·U`
    pub fn mag_sqr(&self) -> ScalarField {
        self.map(
            format!("magSqr({})", self.name),
            self.dimensions * self.dimensions,
            |v| v.length_squared(),
        )
    }

    /// 模
    pub fn mag(&self) -> ScalarField {
        self.map(format!("mag({})", self.name), self.dimensions, |v| v.length())
    }

    /// 点积
    #[track_caller]
    pub fn dot(&self, other: &VectorField) -> ScalarField {
        self.zip_map(
            other,
            format!("({} & {})", self.name, other.name),
            self.dimensions * other.dimensions,
            |a, b| a.dot(b),
        )
    }

    /// 外积 `a ⊗ b`，`(a⊗b)_ij = a_i b_j`
    #[track_caller]
    pub fn outer(&self, other: &VectorField) -> TensorField {
        self.zip_map(
            other,
            format!("({} * {})", self.name, other.name),
            self.dimensions * other.dimensions,
            |a, b| DMat3::from_cols(a * b.x, a * b.y, a * b.z),
        )
    }

    /// 自外积 `U ⊗ U`
    pub fn sqr(&self) -> SymmTensorField {
        self.map(
            format!("sqr({})", self.name),
            self.dimensions * self.dimensions,
            SymmTensor::from_outer,
        )
    }
}

// ========== 张量场 ==========

impl TensorField {
    /// 对称部分
    pub fn symm(&self) -> SymmTensorField {
        self.map(format!("symm({})", self.name), self.dimensions, |t: DMat3| {
            SymmTensor::symm(&t)
        })
    }

    /// `T + Tᵀ`
    pub fn two_symm(&self) -> SymmTensorField {
        self.map(format!("twoSymm({})", self.name), self.dimensions, |t: DMat3| {
            SymmTensor::two_symm(&t)
        })
    }
}

// ========== 对称张量场 ==========

impl SymmTensorField {
    /// 偏量部分
    pub fn dev(&self) -> SymmTensorField {
        self.map(format!("dev({})", self.name), self.dimensions, |t| t.dev())
    }

    /// 迹
    pub fn tr(&self) -> ScalarField {
        self.map(format!("tr({})", self.name), self.dimensions, |t| t.tr())
    }

    /// 模平方
    pub fn mag_sqr(&self) -> ScalarField {
        self.map(
            format!("magSqr({})", self.name),
            self.dimensions * self.dimensions,
            |t| t.mag_sqr(),
        )
    }

    /// 模
    pub fn mag(&self) -> ScalarField {
        self.map(format!("mag({})", self.name), self.dimensions, |t| t.mag())
    }

    /// 双点积 `A:B`
    #[track_caller]
    pub fn double_dot(&self, other: &SymmTensorField) -> ScalarField {
        self.zip_map(
            other,
            format!("({} && {})", self.name, other.name),
            self.dimensions * other.dimensions,
            |a, b| a.double_dot(&b),
        )
    }

    /// 各向同性张量场 `s·I`
    pub fn isotropic(s: &ScalarField) -> SymmTensorField {
        s.map(format!("{}*I", s.name), s.dimensions, |x| {
            SymmTensor::IDENTITY * x
        })
    }
}
