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

/// Result type for encoding operations.
pub type CharsetResult<T> = Result<T, CharsetError>;

/// Errors raised by [`crate::EncodingCodec`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharsetError {
    /// No registered provider answers to this name.
    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),
    /// A codec needs at least one provider.
    #[error("no encoding providers registered")]
    NoProviders,
}
