// crates/sgs_physics/src/fields/mod.rs

//! 带量纲的离散场
//!
//! `Field<T>` 将一组单元（或面）值与其物理量纲、所在位置和名称绑定在一起。
//! 所有算子都生成新场，不修改输入；量纲不一致或长度不一致属于编程错误，
//! 在检测点立即 panic。
//!
//! # 场类型
//!
//! | 别名 | 值类型 | 典型用途 |
//! |------|--------|----------|
//! | [`ScalarField`] | `f64` | k, νsgs, δ, cD, cI |
//! | [`VectorField`] | `DVec3` | U |
//! | [`SymmTensorField`] | [`SymmTensor`] | D, L, M, B |
//! | [`TensorField`] | `DMat3` | ∇U |
//!
//! 超过 [`PARALLEL_THRESHOLD`] 个元素的逐点运算使用 rayon 并行。

pub mod ops;
pub mod tensor;

pub use tensor::SymmTensor;

use glam::{DMat3, DVec3};
use rayon::prelude::*;
use sgs_foundation::Dimensions;
use std::fmt::Debug;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// 并行计算阈值（元素数）
pub const PARALLEL_THRESHOLD: usize = 4096;

/// 场的存储位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldLocation {
    /// 单元中心
    Cell,
    /// 面中心
    Face,
}

/// 可存入场中的值类型
pub trait FieldValue:
    Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
{
    /// 零元
    const ZERO: Self;

    /// 是否所有分量有限
    fn is_finite_value(&self) -> bool;
}

impl FieldValue for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl FieldValue for DVec3 {
    const ZERO: Self = DVec3::ZERO;

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl FieldValue for DMat3 {
    const ZERO: Self = DMat3::ZERO;

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl FieldValue for SymmTensor {
    const ZERO: Self = SymmTensor::ZERO;

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

/// 标量场
pub type ScalarField = Field<f64>;
/// 向量场
pub type VectorField = Field<DVec3>;
/// 对称张量场
pub type SymmTensorField = Field<SymmTensor>;
/// 一般张量场
pub type TensorField = Field<DMat3>;

/// 带量纲的离散场
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T: FieldValue> {
    name: String,
    dimensions: Dimensions,
    location: FieldLocation,
    values: Vec<T>,
}

impl<T: FieldValue> Field<T> {
    /// 由值数组创建
    pub fn new(
        name: impl Into<String>,
        dimensions: Dimensions,
        location: FieldLocation,
        values: Vec<T>,
    ) -> Self {
        Self {
            name: name.into(),
            dimensions,
            location,
            values,
        }
    }

    /// 单元场
    pub fn cells(name: impl Into<String>, dimensions: Dimensions, values: Vec<T>) -> Self {
        Self::new(name, dimensions, FieldLocation::Cell, values)
    }

    /// 均匀单元场
    pub fn uniform(name: impl Into<String>, dimensions: Dimensions, n: usize, value: T) -> Self {
        Self::cells(name, dimensions, vec![value; n])
    }

    /// 零值单元场
    pub fn zeros(name: impl Into<String>, dimensions: Dimensions, n: usize) -> Self {
        Self::uniform(name, dimensions, n, T::ZERO)
    }

    /// 由索引函数生成
    pub fn from_fn<F>(
        name: impl Into<String>,
        dimensions: Dimensions,
        location: FieldLocation,
        n: usize,
        f: F,
    ) -> Self
    where
        F: Fn(usize) -> T + Send + Sync,
    {
        let values = if n >= PARALLEL_THRESHOLD {
            (0..n).into_par_iter().map(&f).collect()
        } else {
            (0..n).map(&f).collect()
        };
        Self::new(name, dimensions, location, values)
    }

    /// 名称
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 量纲
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// 位置
    #[inline]
    pub fn location(&self) -> FieldLocation {
        self.location
    }

    /// 元素数
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 值切片
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// 可变值切片
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// 取出值数组
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// 迭代器
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// 重命名
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 所有值是否有限
    pub fn all_finite(&self) -> bool {
        self.values.iter().all(FieldValue::is_finite_value)
    }

    /// 逐点映射为新场
    pub fn map<U, F>(&self, name: impl Into<String>, dimensions: Dimensions, f: F) -> Field<U>
    where
        U: FieldValue,
        F: Fn(T) -> U + Send + Sync,
    {
        let values = if self.len() >= PARALLEL_THRESHOLD {
            self.values.par_iter().map(|&v| f(v)).collect()
        } else {
            self.values.iter().map(|&v| f(v)).collect()
        };
        Field::new(name, dimensions, self.location, values)
    }

    /// 两场逐点组合
    ///
    /// # Panics
    ///
    /// 位置或长度不一致时 panic。
    #[track_caller]
    pub fn zip_map<U, V, F>(
        &self,
        other: &Field<U>,
        name: impl Into<String>,
        dimensions: Dimensions,
        f: F,
    ) -> Field<V>
    where
        U: FieldValue,
        V: FieldValue,
        F: Fn(T, U) -> V + Send + Sync,
    {
        self.assert_compatible(other);
        let values = if self.len() >= PARALLEL_THRESHOLD {
            self.values
                .par_iter()
                .zip(other.values.par_iter())
                .map(|(&a, &b)| f(a, b))
                .collect()
        } else {
            self.values
                .iter()
                .zip(other.values.iter())
                .map(|(&a, &b)| f(a, b))
                .collect()
        };
        Field::new(name, dimensions, self.location, values)
    }

    #[track_caller]
    fn assert_compatible<U: FieldValue>(&self, other: &Field<U>) {
        assert_eq!(
            self.location, other.location,
            "场位置不一致: '{}' 与 '{}'",
            self.name, other.name
        );
        assert_eq!(
            self.len(),
            other.len(),
            "场长度不一致: '{}' 与 '{}'",
            self.name,
            other.name
        );
    }
}

impl<T: FieldValue> Index<usize> for Field<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.values[i]
    }
}

impl<T: FieldValue> IndexMut<usize> for Field<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.values[i]
    }
}
