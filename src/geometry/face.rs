//! Cube face identification, orientation and visibility masks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifies one of the six faces of the cube-sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CubeFaceId {
    /// +Y face
    Top = 0,
    /// -Y face
    Bottom = 1,
    /// -X face
    Left = 2,
    /// +X face
    Right = 3,
    /// +Z face
    Front = 4,
    /// -Z face
    Back = 5,
}

impl CubeFaceId {
    /// Returns all six cube faces in generation order.
    pub const fn all() -> [CubeFaceId; 6] {
        [
            CubeFaceId::Top,
            CubeFaceId::Bottom,
            CubeFaceId::Left,
            CubeFaceId::Right,
            CubeFaceId::Front,
            CubeFaceId::Back,
        ]
    }

    /// Returns the face index (0-5).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a face from an index (0-5).
    pub const fn from_index(index: usize) -> Option<CubeFaceId> {
        match index {
            0 => Some(CubeFaceId::Top),
            1 => Some(CubeFaceId::Bottom),
            2 => Some(CubeFaceId::Left),
            3 => Some(CubeFaceId::Right),
            4 => Some(CubeFaceId::Front),
            5 => Some(CubeFaceId::Back),
            _ => None,
        }
    }

    /// Returns a short name for the face (e.g., "top", "back").
    pub const fn short_name(self) -> &'static str {
        match self {
            CubeFaceId::Top => "top",
            CubeFaceId::Bottom => "bottom",
            CubeFaceId::Left => "left",
            CubeFaceId::Right => "right",
            CubeFaceId::Front => "front",
            CubeFaceId::Back => "back",
        }
    }

    /// Outward unit normal of the face ("local up").
    pub const fn normal(self) -> Vec3 {
        match self {
            CubeFaceId::Top => Vec3::Y,
            CubeFaceId::Bottom => Vec3::NEG_Y,
            CubeFaceId::Left => Vec3::NEG_X,
            CubeFaceId::Right => Vec3::X,
            CubeFaceId::Front => Vec3::Z,
            CubeFaceId::Back => Vec3::NEG_Z,
        }
    }

    /// Tangent axes `(axis_a, axis_b)` spanning the face.
    ///
    /// `axis_a` permutes the normal's components, `axis_b = normal × axis_a`,
    /// so `axis_a × axis_b == normal`.
    pub fn axes(self) -> (Vec3, Vec3) {
        face_axes(self.normal())
    }
}

/// Tangent axes for an arbitrary axis-aligned face normal.
pub fn face_axes(normal: Vec3) -> (Vec3, Vec3) {
    let axis_a = Vec3::new(normal.y, normal.z, normal.x);
    let axis_b = normal.cross(axis_a);
    (axis_a, axis_b)
}

/// Selects which faces a generation pass builds.
///
/// Faces outside the mask are not generated at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceMask {
    #[default]
    All,
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl FaceMask {
    /// Returns the single selected face, or `None` for [`FaceMask::All`].
    pub const fn single(self) -> Option<CubeFaceId> {
        match self {
            FaceMask::All => None,
            FaceMask::Top => Some(CubeFaceId::Top),
            FaceMask::Bottom => Some(CubeFaceId::Bottom),
            FaceMask::Left => Some(CubeFaceId::Left),
            FaceMask::Right => Some(CubeFaceId::Right),
            FaceMask::Front => Some(CubeFaceId::Front),
            FaceMask::Back => Some(CubeFaceId::Back),
        }
    }

    /// Returns true if `face` is generated under this mask.
    pub fn includes(self, face: CubeFaceId) -> bool {
        self.single().map_or(true, |only| only == face)
    }

    /// Returns the selected faces in generation order.
    pub fn faces(self) -> Vec<CubeFaceId> {
        CubeFaceId::all()
            .into_iter()
            .filter(|&face| self.includes(face))
            .collect()
    }
}

impl From<CubeFaceId> for FaceMask {
    fn from(face: CubeFaceId) -> Self {
        match face {
            CubeFaceId::Top => FaceMask::Top,
            CubeFaceId::Bottom => FaceMask::Bottom,
            CubeFaceId::Left => FaceMask::Left,
            CubeFaceId::Right => FaceMask::Right,
            CubeFaceId::Front => FaceMask::Front,
            CubeFaceId::Back => FaceMask::Back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_faces() {
        let faces = CubeFaceId::all();
        assert_eq!(faces.len(), 6);
        for (i, face) in faces.iter().enumerate() {
            assert_eq!(face.index(), i);
            assert_eq!(CubeFaceId::from_index(i), Some(*face));
        }
        assert!(CubeFaceId::from_index(6).is_none());
    }

    #[test]
    fn test_short_names() {
        assert_eq!(CubeFaceId::Top.short_name(), "top");
        assert_eq!(CubeFaceId::Back.short_name(), "back");
    }

    #[test]
    fn test_axes_are_orthonormal_and_right_handed() {
        for face in CubeFaceId::all() {
            let n = face.normal();
            let (a, b) = face.axes();

            assert!((a.length() - 1.0).abs() < 1e-6);
            assert!((b.length() - 1.0).abs() < 1e-6);
            assert!(n.dot(a).abs() < 1e-6, "{:?}: axis_a not orthogonal", face);
            assert!(n.dot(b).abs() < 1e-6, "{:?}: axis_b not orthogonal", face);
            assert!(a.dot(b).abs() < 1e-6, "{:?}: axes not orthogonal", face);
            assert!(
                (a.cross(b) - n).length() < 1e-6,
                "{:?}: axis_a x axis_b should equal the normal",
                face
            );
        }
    }

    #[test]
    fn test_top_face_axes() {
        let (a, b) = CubeFaceId::Top.axes();
        assert_eq!(a, Vec3::X);
        assert_eq!(b, Vec3::NEG_Z);
    }

    #[test]
    fn test_face_mask() {
        assert_eq!(FaceMask::All.faces(), CubeFaceId::all().to_vec());
        assert_eq!(FaceMask::Front.faces(), vec![CubeFaceId::Front]);
        assert!(FaceMask::Left.includes(CubeFaceId::Left));
        assert!(!FaceMask::Left.includes(CubeFaceId::Right));

        for face in CubeFaceId::all() {
            assert_eq!(FaceMask::from(face).single(), Some(face));
        }
        assert_eq!(FaceMask::default(), FaceMask::All);
    }
}
