//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

/// Result type for compression operations.
pub type CompressResult<T> = Result<T, CompressError>;

/// Errors raised by [`crate::CompressionStage`].
#[derive(Debug, thiserror::Error)]
pub enum CompressError {
    /// The compressed stream could not be inflated. The stage has already
    /// switched itself off; `inflated` holds what was decoded before the
    /// failure and `remaining` the input that was never consumed.
    #[error("corrupt compressed stream: {source}")]
    Corrupt {
        /// Underlying zlib error.
        #[source]
        source: flate2::DecompressError,
        /// Output produced before the failure.
        inflated: Vec<u8>,
        /// Input not consumed by the decompressor.
        remaining: Vec<u8>,
    },
}
