use crate::error::ClientError;
use crate::metadata::Metadata;
use crate::utils::hex_with_prefix;
use parity_scale_codec::{Encode, Output};

/// A call into a runtime module: `[module_index, call_index, ...parameters]`.
///
/// Parameters are already SCALE-encoded and appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    module_index: u8,
    call_index: u8,
    parameters: Vec<u8>,
}

impl Method {
    pub fn new(module_index: u8, call_index: u8, parameters: Vec<u8>) -> Self {
        Self {
            module_index,
            call_index,
            parameters,
        }
    }

    pub fn without_parameters(module_index: u8, call_index: u8) -> Self {
        Self::new(module_index, call_index, Vec::new())
    }

    /// Look up both indices by name.
    pub fn from_metadata(
        metadata: &Metadata,
        module: &str,
        call: &str,
        parameters: Vec<u8>,
    ) -> Result<Self, ClientError> {
        let (module_index, call_index) =
            metadata
                .find_call(module, call)
                .ok_or_else(|| ClientError::ModuleOrItemNotFound {
                    module: module.to_string(),
                    item: call.to_string(),
                    origin: metadata.origin().to_string(),
                })?;
        Ok(Self::new(module_index, call_index, parameters))
    }

    pub fn module_index(&self) -> u8 {
        self.module_index
    }

    pub fn call_index(&self) -> u8 {
        self.call_index
    }

    pub fn parameters(&self) -> &[u8] {
        &self.parameters
    }

    pub fn to_hex(&self) -> String {
        hex_with_prefix(&self.encode())
    }
}

impl Encode for Method {
    fn size_hint(&self) -> usize {
        2 + self.parameters.len()
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.push_byte(self.module_index);
        dest.push_byte(self.call_index);
        dest.write(&self.parameters);
    }
}
