// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Output parameter vectors to file

use crate::core::{DeserializeOwnedAlias, Error, Observe, SerializeAlias, State};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufWriter;
use std::marker::PhantomData;
use std::path::Path;

/// Different kinds of serializers
#[derive(Copy, Clone, Serialize, Deserialize, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum WriteToFileSerializer {
    /// Bincode
    Bincode,
    /// JSON
    JSON,
}

impl Default for WriteToFileSerializer {
    fn default() -> Self {
        WriteToFileSerializer::Bincode
    }
}

/// Writes the current best parameter vector to disk at every observed iteration.
///
/// Used e.g. to dump the trust-region iterate `x` or an L-BFGS step, one file per iteration, so
/// a run can be inspected after the fact without re-running the optimizer.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct WriteToFile<I> {
    /// Directory
    dir: String,
    /// File prefix
    prefix: String,
    /// Chosen serializer
    serializer: WriteToFileSerializer,
    _state: PhantomData<I>,
}

impl<I> WriteToFile<I> {
    /// Create a new `WriteToFile` struct
    pub fn new(dir: &str, prefix: &str) -> Self {
        WriteToFile {
            dir: dir.to_string(),
            prefix: prefix.to_string(),
            serializer: WriteToFileSerializer::Bincode,
            _state: PhantomData,
        }
    }

    /// Set serializer
    #[must_use]
    pub fn serializer(mut self, serializer: WriteToFileSerializer) -> Self {
        self.serializer = serializer;
        self
    }
}

impl<I> Observe<I> for WriteToFile<I>
where
    I: State,
    I::Param: SerializeAlias + DeserializeOwnedAlias,
{
    fn observe_iter(&mut self, state: &I, _kv: &crate::core::KV) -> Result<(), Error> {
        let param = state.get_best_param_ref();
        let iter = state.get_iter();
        let dir = Path::new(&self.dir);
        if !dir.exists() {
            std::fs::create_dir_all(dir)?
        }

        let mut fname = self.prefix.clone();
        fname.push('_');
        fname.push_str(&iter.to_string());
        fname.push_str(".arp");
        let fname = dir.join(fname);

        let f = BufWriter::new(File::create(fname)?);
        match self.serializer {
            WriteToFileSerializer::Bincode => {
                bincode::serialize_into(f, &param)?;
            }
            WriteToFileSerializer::JSON => {
                serde_json::to_writer_pretty(f, &param)?;
            }
        }
        Ok(())
    }
}
