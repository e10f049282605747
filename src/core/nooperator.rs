// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Fake problems for testing.

use crate::core::{
    ArgminFloat, CostFunction, DeserializeOwnedAlias, Error, Gradient, Hessian, SerializeAlias,
};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// No-op problem with free choice of the parameter/output/gradient/Hessian types.
#[derive(Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct NoOperator<P, U, G, H, F> {
    param: std::marker::PhantomData<P>,
    output: std::marker::PhantomData<U>,
    gradient: std::marker::PhantomData<G>,
    hessian: std::marker::PhantomData<H>,
    float: std::marker::PhantomData<F>,
}

impl<P, U, G, H, F> NoOperator<P, U, G, H, F> {
    /// Constructor
    #[allow(dead_code)]
    pub fn new() -> Self {
        NoOperator {
            param: std::marker::PhantomData,
            output: std::marker::PhantomData,
            gradient: std::marker::PhantomData,
            hessian: std::marker::PhantomData,
            float: std::marker::PhantomData,
        }
    }
}

impl<P, U, G, H, F> Display for NoOperator<P, U, G, H, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "NoOperator")
    }
}

impl<P, U, G, H, F> CostFunction for NoOperator<P, U, G, H, F>
where
    P: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    U: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    G: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    H: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    F: ArgminFloat,
{
    type Param = P;
    type Output = U;

    /// Do nothing, really.
    fn cost(&self, _p: &Self::Param) -> Result<Self::Output, Error> {
        Ok(Self::Output::default())
    }
}

impl<P, U, G, H, F> Gradient for NoOperator<P, U, G, H, F>
where
    P: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    U: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    G: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    H: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    F: ArgminFloat,
{
    type Param = P;
    type Gradient = G;

    /// Do nothing, really.
    fn gradient(&self, _p: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok(Self::Gradient::default())
    }
}

impl<P, U, G, H, F> Hessian for NoOperator<P, U, G, H, F>
where
    P: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    U: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    G: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    H: Clone + Default + Debug + Send + Sync + SerializeAlias + DeserializeOwnedAlias,
    F: ArgminFloat,
{
    type Param = P;
    type Hessian = H;

    /// Do nothing, really.
    fn hessian(&self, _p: &Self::Param) -> Result<Self::Hessian, Error> {
        Ok(Self::Hessian::default())
    }
}

/// Minimal no-op problem which panics when called. Used only to pin down generic parameters in
/// trait-bound tests.
#[derive(Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct MinimalNoOperator {}

impl MinimalNoOperator {
    /// Constructor
    #[allow(dead_code)]
    pub fn new() -> Self {
        MinimalNoOperator {}
    }
}

impl Display for MinimalNoOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "MinimalNoOperator")
    }
}

impl CostFunction for MinimalNoOperator {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, _p: &Self::Param) -> Result<Self::Output, Error> {
        unimplemented!()
    }
}

impl Gradient for MinimalNoOperator {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, _p: &Self::Param) -> Result<Self::Gradient, Error> {
        unimplemented!()
    }
}

impl Hessian for MinimalNoOperator {
    type Param = Vec<f64>;
    type Hessian = Vec<Vec<f64>>;

    fn hessian(&self, _p: &Self::Param) -> Result<Self::Hessian, Error> {
        unimplemented!()
    }
}
