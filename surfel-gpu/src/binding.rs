//! Attribute binding for packed buffers.

use crate::backend::ShaderProgram;
use crate::layout::{AttributeKind, VertexLayout};
use crate::packer::PackedBuffer;
use crate::GpuError;
use tracing::trace;

/// Resolved vertex attribute pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBinding {
    pub kind: AttributeKind,
    pub location: u32,
    pub components: usize,
    pub stride_bytes: usize,
    pub offset_bytes: usize,
}

/// Resolve every attribute of `layout` against `program`, checking that `layout`
/// agrees with the layout `buffer` was packed with.
pub fn bind_attributes(
    program: &dyn ShaderProgram,
    layout: VertexLayout,
    buffer: &PackedBuffer,
) -> Result<Vec<AttributeBinding>, GpuError> {
    let packed = buffer.layout();
    if packed.stride_bytes() != layout.stride_bytes() {
        return Err(GpuError::StrideMismatch {
            binding: layout.stride_bytes(),
            packed: packed.stride_bytes(),
        });
    }
    debug_assert_eq!(packed, layout);

    layout
        .attributes()
        .iter()
        .map(|attr| {
            let location = program
                .attribute_location(attr.name)
                .ok_or_else(|| GpuError::UnknownAttribute(attr.name.to_string()))?;
            trace!(
                "Binding {} at location {} (offset {}, stride {})",
                attr.name,
                location,
                attr.offset_bytes,
                layout.stride_bytes()
            );
            Ok(AttributeBinding {
                kind: attr.kind,
                location,
                components: attr.components,
                stride_bytes: layout.stride_bytes(),
                offset_bytes: attr.offset_bytes,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessBackend;
    use crate::packer::{QuadScale, RenderMode, pack};
    use surfel_data::VertexRecord;

    fn buffer(layout: VertexLayout, mode: RenderMode) -> PackedBuffer {
        pack(&[VertexRecord::default()], mode, layout, QuadScale::default()).unwrap()
    }

    #[test]
    fn test_surfel_bindings_match_byte_map() {
        let program = HeadlessBackend::new();
        let packed = buffer(VertexLayout::SURFEL, RenderMode::Surfels);
        let bindings = bind_attributes(&program, VertexLayout::SURFEL, &packed).unwrap();
        let offsets: Vec<_> = bindings.iter().map(|b| (b.offset_bytes, b.components)).collect();
        assert_eq!(offsets, vec![(0, 4), (16, 4), (32, 4), (48, 2), (56, 4)]);
        assert!(bindings.iter().all(|b| b.stride_bytes == 72));
    }

    #[test]
    fn test_stride_mismatch_rejected() {
        let program = HeadlessBackend::new();
        let packed = buffer(VertexLayout::POINT, RenderMode::Points);
        let err = bind_attributes(&program, VertexLayout::SURFEL, &packed).unwrap_err();
        assert_eq!(
            err,
            GpuError::StrideMismatch {
                binding: 72,
                packed: 48
            }
        );
    }

    #[test]
    fn test_unknown_attribute_rejected() {
        let program = HeadlessBackend::with_attributes(&["vPosition", "vNormal"]);
        let packed = buffer(VertexLayout::POINT, RenderMode::Points);
        let err = bind_attributes(&program, VertexLayout::POINT, &packed).unwrap_err();
        assert_eq!(err, GpuError::UnknownAttribute("vColor".to_string()));
    }
}
