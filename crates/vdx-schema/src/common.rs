//! Shared building blocks referenced throughout the schema.

use vdx_core::{FieldKind, MessageDescriptor, ScalarType, Tag};

fn double() -> FieldKind {
    FieldKind::Scalar(ScalarType::Double)
}

/// `vdx.InterfaceVersion`: semantic version of the interface a sender was
/// compiled against.
pub mod interface_version {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.InterfaceVersion";
    /// `uint32 version_major = 1`
    pub const VERSION_MAJOR: Tag = Tag(1);
    /// `uint32 version_minor = 2`
    pub const VERSION_MINOR: Tag = Tag(2);
    /// `uint32 version_patch = 3`
    pub const VERSION_PATCH: Tag = Tag(3);

    pub(crate) fn descriptor() -> MessageDescriptor {
        let uint32 = FieldKind::Scalar(ScalarType::Uint32);
        MessageDescriptor::new(NAME)
            .field(VERSION_MAJOR.0, "version_major", uint32.clone())
            .field(VERSION_MINOR.0, "version_minor", uint32.clone())
            .field(VERSION_PATCH.0, "version_patch", uint32)
    }
}

/// `vdx.Timestamp`: simulation time since the epoch of the run.
pub mod timestamp {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.Timestamp";
    /// `int64 seconds = 1`
    pub const SECONDS: Tag = Tag(1);
    /// `uint32 nanos = 2`, in `[0, 999_999_999]`.
    pub const NANOS: Tag = Tag(2);

    pub(crate) fn descriptor() -> MessageDescriptor {
        MessageDescriptor::new(NAME)
            .field(SECONDS.0, "seconds", FieldKind::Scalar(ScalarType::Int64))
            .field(NANOS.0, "nanos", FieldKind::Scalar(ScalarType::Uint32))
    }
}

/// `vdx.Vector3d`: a Cartesian vector in metres (or a derivative thereof).
pub mod vector3d {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.Vector3d";
    /// `double x = 1`
    pub const X: Tag = Tag(1);
    /// `double y = 2`
    pub const Y: Tag = Tag(2);
    /// `double z = 3`
    pub const Z: Tag = Tag(3);

    pub(crate) fn descriptor() -> MessageDescriptor {
        MessageDescriptor::new(NAME)
            .field(X.0, "x", double())
            .field(Y.0, "y", double())
            .field(Z.0, "z", double())
    }
}

/// `vdx.Orientation3d`: roll, pitch and yaw in radians.
pub mod orientation3d {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.Orientation3d";
    /// `double roll = 1`
    pub const ROLL: Tag = Tag(1);
    /// `double pitch = 2`
    pub const PITCH: Tag = Tag(2);
    /// `double yaw = 3`
    pub const YAW: Tag = Tag(3);

    pub(crate) fn descriptor() -> MessageDescriptor {
        MessageDescriptor::new(NAME)
            .field(ROLL.0, "roll", double())
            .field(PITCH.0, "pitch", double())
            .field(YAW.0, "yaw", double())
    }
}

/// `vdx.GeodeticPosition`: WGS84 coordinates.
pub mod geodetic_position {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.GeodeticPosition";
    /// `double latitude = 1`, degrees.
    pub const LATITUDE: Tag = Tag(1);
    /// `double longitude = 2`, degrees.
    pub const LONGITUDE: Tag = Tag(2);
    /// `double altitude = 3`, metres above the ellipsoid.
    pub const ALTITUDE: Tag = Tag(3);

    pub(crate) fn descriptor() -> MessageDescriptor {
        MessageDescriptor::new(NAME)
            .field(LATITUDE.0, "latitude", double())
            .field(LONGITUDE.0, "longitude", double())
            .field(ALTITUDE.0, "altitude", double())
    }
}
