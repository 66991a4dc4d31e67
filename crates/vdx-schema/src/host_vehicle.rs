//! `vdx.HostVehicleData`: the state of the simulated ego vehicle as one
//! simulator reports it to another.
//!
//! Every sub-message is declared nested inside `HostVehicleData`, so its
//! fully-qualified name is `vdx.HostVehicleData.<Name>`. Enums follow the
//! `UNKNOWN = 0`, `OTHER = 1` convention: zero is what a decoder reports
//! for a value it does not recognise, one is what a sender uses for a
//! value the schema has no name for.

use vdx_core::{EnumDescriptor, FieldKind, MessageDescriptor, ScalarType, Tag};

use crate::common::{geodetic_position, interface_version, orientation3d, timestamp, vector3d};

fn double() -> FieldKind {
    FieldKind::Scalar(ScalarType::Double)
}

/// Fully-qualified type name.
pub const NAME: &str = "vdx.HostVehicleData";
/// `InterfaceVersion version = 1`; the message's version field.
pub const VERSION: Tag = Tag(1);
/// `Timestamp timestamp = 2`
pub const TIMESTAMP: Tag = Tag(2);
/// `uint64 host_vehicle_id = 3`
pub const HOST_VEHICLE_ID: Tag = Tag(3);
/// `VehicleBasics vehicle_basics = 4`
pub const VEHICLE_BASICS: Tag = Tag(4);
/// `VehicleMotion vehicle_motion = 5`
pub const VEHICLE_MOTION: Tag = Tag(5);
/// `VehiclePowertrain vehicle_powertrain = 6`
pub const VEHICLE_POWERTRAIN: Tag = Tag(6);
/// `VehicleSteering vehicle_steering = 7`
pub const VEHICLE_STEERING: Tag = Tag(7);
/// `VehicleWheels vehicle_wheels = 8`
pub const VEHICLE_WHEELS: Tag = Tag(8);
/// `VehicleLocalization vehicle_localization = 9`
pub const VEHICLE_LOCALIZATION: Tag = Tag(9);
/// `repeated VehicleAutomatedDrivingFunction vehicle_automated_driving_function = 10`
pub const VEHICLE_AUTOMATED_DRIVING_FUNCTION: Tag = Tag(10);

/// `HostVehicleData.VehicleBasics`: static and operating-state information.
pub mod vehicle_basics {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.HostVehicleData.VehicleBasics";
    /// `double curb_weight = 1`, kilograms.
    pub const CURB_WEIGHT: Tag = Tag(1);
    /// `OperatingState operating_state = 2`
    pub const OPERATING_STATE: Tag = Tag(2);

    /// `VehicleBasics.OperatingState`
    pub mod operating_state {
        #![allow(missing_docs)]

        /// Fully-qualified enum name.
        pub const NAME: &str = "vdx.HostVehicleData.VehicleBasics.OperatingState";
        pub const UNKNOWN: i32 = 0;
        pub const OTHER: i32 = 1;
        pub const SLEEP: i32 = 2;
        pub const STANDBY: i32 = 3;
        pub const BOARDING: i32 = 4;
        pub const ENTERTAINMENT: i32 = 5;
        pub const DRIVING_READY: i32 = 6;
        pub const DRIVING: i32 = 7;
    }

    pub(crate) fn descriptor() -> MessageDescriptor {
        use self::operating_state as os;
        MessageDescriptor::new("VehicleBasics")
            .field(CURB_WEIGHT.0, "curb_weight", double())
            .field(
                OPERATING_STATE.0,
                "operating_state",
                FieldKind::enumeration(os::NAME),
            )
            .enumeration(
                EnumDescriptor::new("OperatingState")
                    .value("OPERATING_STATE_UNKNOWN", os::UNKNOWN)
                    .value("OPERATING_STATE_OTHER", os::OTHER)
                    .value("OPERATING_STATE_SLEEP", os::SLEEP)
                    .value("OPERATING_STATE_STANDBY", os::STANDBY)
                    .value("OPERATING_STATE_BOARDING", os::BOARDING)
                    .value("OPERATING_STATE_ENTERTAINMENT", os::ENTERTAINMENT)
                    .value("OPERATING_STATE_DRIVING_READY", os::DRIVING_READY)
                    .value("OPERATING_STATE_DRIVING", os::DRIVING),
            )
    }
}

/// `HostVehicleData.VehicleMotion`: kinematics of the vehicle reference
/// point in the global frame.
pub mod vehicle_motion {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.HostVehicleData.VehicleMotion";
    /// `Vector3d position = 1`
    pub const POSITION: Tag = Tag(1);
    /// `Orientation3d orientation = 2`
    pub const ORIENTATION: Tag = Tag(2);
    /// `Vector3d velocity = 3`
    pub const VELOCITY: Tag = Tag(3);
    /// `Orientation3d orientation_rate = 4`
    pub const ORIENTATION_RATE: Tag = Tag(4);
    /// `Vector3d acceleration = 5`
    pub const ACCELERATION: Tag = Tag(5);
    /// `Orientation3d orientation_acceleration = 6`
    pub const ORIENTATION_ACCELERATION: Tag = Tag(6);
    /// `double current_curvature = 7`, 1/m.
    pub const CURRENT_CURVATURE: Tag = Tag(7);

    pub(crate) fn descriptor() -> MessageDescriptor {
        let vector = || FieldKind::message(vector3d::NAME);
        let orientation = || FieldKind::message(orientation3d::NAME);
        MessageDescriptor::new("VehicleMotion")
            .field(POSITION.0, "position", vector())
            .field(ORIENTATION.0, "orientation", orientation())
            .field(VELOCITY.0, "velocity", vector())
            .field(ORIENTATION_RATE.0, "orientation_rate", orientation())
            .field(ACCELERATION.0, "acceleration", vector())
            .field(
                ORIENTATION_ACCELERATION.0,
                "orientation_acceleration",
                orientation(),
            )
            .field(CURRENT_CURVATURE.0, "current_curvature", double())
    }
}

/// `HostVehicleData.VehiclePowertrain`: driver pedal inputs and motors.
pub mod vehicle_powertrain {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.HostVehicleData.VehiclePowertrain";
    /// `Pedalry pedalry = 1`
    pub const PEDALRY: Tag = Tag(1);
    /// `repeated Motor motor = 2`
    pub const MOTOR: Tag = Tag(2);

    /// `VehiclePowertrain.Pedalry`: pedal positions, each in `[0, 1]`.
    pub mod pedalry {
        use super::*;

        /// Fully-qualified type name.
        pub const NAME: &str = "vdx.HostVehicleData.VehiclePowertrain.Pedalry";
        /// `double pedal_position_acceleration = 1`
        pub const PEDAL_POSITION_ACCELERATION: Tag = Tag(1);
        /// `double pedal_position_brake = 2`
        pub const PEDAL_POSITION_BRAKE: Tag = Tag(2);
        /// `double pedal_position_clutch = 3`
        pub const PEDAL_POSITION_CLUTCH: Tag = Tag(3);

        pub(crate) fn descriptor() -> MessageDescriptor {
            MessageDescriptor::new("Pedalry")
                .field(
                    PEDAL_POSITION_ACCELERATION.0,
                    "pedal_position_acceleration",
                    double(),
                )
                .field(PEDAL_POSITION_BRAKE.0, "pedal_position_brake", double())
                .field(PEDAL_POSITION_CLUTCH.0, "pedal_position_clutch", double())
        }
    }

    /// `VehiclePowertrain.Motor`
    pub mod motor {
        use super::*;

        /// Fully-qualified type name.
        pub const NAME: &str = "vdx.HostVehicleData.VehiclePowertrain.Motor";
        /// `Type type = 1`
        pub const TYPE: Tag = Tag(1);
        /// `double rpm = 2`
        pub const RPM: Tag = Tag(2);
        /// `double torque = 3`, newton-metres.
        pub const TORQUE: Tag = Tag(3);

        /// `Motor.Type`
        pub mod motor_type {
            #![allow(missing_docs)]

            /// Fully-qualified enum name.
            pub const NAME: &str = "vdx.HostVehicleData.VehiclePowertrain.Motor.Type";
            pub const UNKNOWN: i32 = 0;
            pub const OTHER: i32 = 1;
            pub const OTTO: i32 = 2;
            pub const DIESEL: i32 = 3;
            pub const ELECTRIC: i32 = 4;
        }

        pub(crate) fn descriptor() -> MessageDescriptor {
            MessageDescriptor::new("Motor")
                .field(TYPE.0, "type", FieldKind::enumeration(motor_type::NAME))
                .field(RPM.0, "rpm", double())
                .field(TORQUE.0, "torque", double())
                .enumeration(
                    EnumDescriptor::new("Type")
                        .value("TYPE_UNKNOWN", motor_type::UNKNOWN)
                        .value("TYPE_OTHER", motor_type::OTHER)
                        .value("TYPE_OTTO", motor_type::OTTO)
                        .value("TYPE_DIESEL", motor_type::DIESEL)
                        .value("TYPE_ELECTRIC", motor_type::ELECTRIC),
                )
        }
    }

    pub(crate) fn descriptor() -> MessageDescriptor {
        MessageDescriptor::new("VehiclePowertrain")
            .field(PEDALRY.0, "pedalry", FieldKind::message(pedalry::NAME))
            .field(
                MOTOR.0,
                "motor",
                FieldKind::repeated(FieldKind::message(motor::NAME)),
            )
            .message(pedalry::descriptor())
            .message(motor::descriptor())
    }
}

/// `HostVehicleData.VehicleSteering`: steering wheel state.
pub mod vehicle_steering {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.HostVehicleData.VehicleSteering";
    /// `double steering_wheel_angle = 1`, radians, positive to the left.
    pub const STEERING_WHEEL_ANGLE: Tag = Tag(1);
    /// `double steering_wheel_angular_speed = 2`
    pub const STEERING_WHEEL_ANGULAR_SPEED: Tag = Tag(2);
    /// `double steering_wheel_torque = 3`
    pub const STEERING_WHEEL_TORQUE: Tag = Tag(3);

    pub(crate) fn descriptor() -> MessageDescriptor {
        MessageDescriptor::new("VehicleSteering")
            .field(STEERING_WHEEL_ANGLE.0, "steering_wheel_angle", double())
            .field(
                STEERING_WHEEL_ANGULAR_SPEED.0,
                "steering_wheel_angular_speed",
                double(),
            )
            .field(STEERING_WHEEL_TORQUE.0, "steering_wheel_torque", double())
    }
}

/// `HostVehicleData.VehicleWheels`: per-wheel state.
pub mod vehicle_wheels {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.HostVehicleData.VehicleWheels";
    /// `repeated WheelData wheel_data = 1`
    pub const WHEEL_DATA: Tag = Tag(1);

    /// `VehicleWheels.WheelData`
    pub mod wheel_data {
        use super::*;

        /// Fully-qualified type name.
        pub const NAME: &str = "vdx.HostVehicleData.VehicleWheels.WheelData";
        /// `uint32 axle = 1`, counted from the front starting at 0.
        pub const AXLE: Tag = Tag(1);
        /// `uint32 index = 2`, counted from the left starting at 0.
        pub const INDEX: Tag = Tag(2);
        /// `Vector3d position = 3`, wheel centre in the vehicle frame.
        pub const POSITION: Tag = Tag(3);
        /// `double rotation_rate = 4`, rad/s.
        pub const ROTATION_RATE: Tag = Tag(4);
        /// `Vector3d contact_point = 5`
        pub const CONTACT_POINT: Tag = Tag(5);
        /// `double friction_coefficient = 6`
        pub const FRICTION_COEFFICIENT: Tag = Tag(6);

        pub(crate) fn descriptor() -> MessageDescriptor {
            let uint32 = FieldKind::Scalar(ScalarType::Uint32);
            MessageDescriptor::new("WheelData")
                .field(AXLE.0, "axle", uint32.clone())
                .field(INDEX.0, "index", uint32)
                .field(POSITION.0, "position", FieldKind::message(vector3d::NAME))
                .field(ROTATION_RATE.0, "rotation_rate", double())
                .field(
                    CONTACT_POINT.0,
                    "contact_point",
                    FieldKind::message(vector3d::NAME),
                )
                .field(FRICTION_COEFFICIENT.0, "friction_coefficient", double())
        }
    }

    pub(crate) fn descriptor() -> MessageDescriptor {
        MessageDescriptor::new("VehicleWheels")
            .field(
                WHEEL_DATA.0,
                "wheel_data",
                FieldKind::repeated(FieldKind::message(wheel_data::NAME)),
            )
            .message(wheel_data::descriptor())
    }
}

/// `HostVehicleData.VehicleLocalization`: where the vehicle believes it is.
pub mod vehicle_localization {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.HostVehicleData.VehicleLocalization";
    /// `Vector3d position = 1`
    pub const POSITION: Tag = Tag(1);
    /// `Orientation3d orientation = 2`
    pub const ORIENTATION: Tag = Tag(2);
    /// `GeodeticPosition geodetic_position = 3`
    pub const GEODETIC_POSITION: Tag = Tag(3);

    pub(crate) fn descriptor() -> MessageDescriptor {
        MessageDescriptor::new("VehicleLocalization")
            .field(POSITION.0, "position", FieldKind::message(vector3d::NAME))
            .field(
                ORIENTATION.0,
                "orientation",
                FieldKind::message(orientation3d::NAME),
            )
            .field(
                GEODETIC_POSITION.0,
                "geodetic_position",
                FieldKind::message(geodetic_position::NAME),
            )
    }
}

/// `HostVehicleData.VehicleAutomatedDrivingFunction`: state of one driver
/// assistance or automated driving function.
pub mod automated_driving_function {
    use super::*;

    /// Fully-qualified type name.
    pub const NAME: &str = "vdx.HostVehicleData.VehicleAutomatedDrivingFunction";
    /// `Name name = 1`
    pub const FUNCTION_NAME: Tag = Tag(1);
    /// `string custom_name = 2`, set when `name` is `OTHER`.
    pub const CUSTOM_NAME: Tag = Tag(2);
    /// `State state = 3`
    pub const STATE: Tag = Tag(3);
    /// `string custom_state = 4`, set when `state` is `OTHER`.
    pub const CUSTOM_STATE: Tag = Tag(4);
    /// `DriverOverride driver_override = 5`
    pub const DRIVER_OVERRIDE: Tag = Tag(5);
    /// `repeated string custom_detail = 6`
    pub const CUSTOM_DETAIL: Tag = Tag(6);

    /// `VehicleAutomatedDrivingFunction.Name`
    pub mod function_name {
        #![allow(missing_docs)]

        /// Fully-qualified enum name.
        pub const NAME: &str = "vdx.HostVehicleData.VehicleAutomatedDrivingFunction.Name";
        pub const UNKNOWN: i32 = 0;
        pub const OTHER: i32 = 1;
        pub const BLIND_SPOT_WARNING: i32 = 2;
        pub const FORWARD_COLLISION_WARNING: i32 = 3;
        pub const LANE_DEPARTURE_WARNING: i32 = 4;
        pub const ADAPTIVE_CRUISE_CONTROL: i32 = 5;
        pub const EMERGENCY_BRAKE_ASSIST: i32 = 6;
        pub const LANE_KEEPING_ASSIST: i32 = 7;
        pub const AUTOMATED_PARKING: i32 = 8;
    }

    /// `VehicleAutomatedDrivingFunction.State`
    pub mod state {
        #![allow(missing_docs)]

        /// Fully-qualified enum name.
        pub const NAME: &str = "vdx.HostVehicleData.VehicleAutomatedDrivingFunction.State";
        pub const UNKNOWN: i32 = 0;
        pub const OTHER: i32 = 1;
        pub const ERRORED: i32 = 2;
        pub const UNAVAILABLE: i32 = 3;
        pub const AVAILABLE: i32 = 4;
        pub const STANDBY: i32 = 5;
        pub const ACTIVE: i32 = 6;
    }

    /// `VehicleAutomatedDrivingFunction.DriverOverride`: whether and why
    /// the driver took over from the function.
    pub mod driver_override {
        use super::*;

        /// Fully-qualified type name.
        pub const NAME: &str =
            "vdx.HostVehicleData.VehicleAutomatedDrivingFunction.DriverOverride";
        /// `bool active = 1`
        pub const ACTIVE: Tag = Tag(1);
        /// `repeated Reason override_reason = 2`
        pub const OVERRIDE_REASON: Tag = Tag(2);

        /// `DriverOverride.Reason`
        pub mod reason {
            #![allow(missing_docs)]

            /// Fully-qualified enum name.
            pub const NAME: &str =
                "vdx.HostVehicleData.VehicleAutomatedDrivingFunction.DriverOverride.Reason";
            pub const UNKNOWN: i32 = 0;
            pub const OTHER: i32 = 1;
            pub const BRAKE_PEDAL: i32 = 2;
            pub const STEERING_INPUT: i32 = 3;
        }

        pub(crate) fn descriptor() -> MessageDescriptor {
            MessageDescriptor::new("DriverOverride")
                .field(ACTIVE.0, "active", FieldKind::Scalar(ScalarType::Bool))
                .field(
                    OVERRIDE_REASON.0,
                    "override_reason",
                    FieldKind::repeated(FieldKind::enumeration(reason::NAME)),
                )
                .enumeration(
                    EnumDescriptor::new("Reason")
                        .value("REASON_UNKNOWN", reason::UNKNOWN)
                        .value("REASON_OTHER", reason::OTHER)
                        .value("REASON_BRAKE_PEDAL", reason::BRAKE_PEDAL)
                        .value("REASON_STEERING_INPUT", reason::STEERING_INPUT),
                )
        }
    }

    pub(crate) fn descriptor() -> MessageDescriptor {
        let string = || FieldKind::Scalar(ScalarType::String);
        MessageDescriptor::new("VehicleAutomatedDrivingFunction")
            .field(
                FUNCTION_NAME.0,
                "name",
                FieldKind::enumeration(function_name::NAME),
            )
            .field(CUSTOM_NAME.0, "custom_name", string())
            .field(STATE.0, "state", FieldKind::enumeration(state::NAME))
            .field(CUSTOM_STATE.0, "custom_state", string())
            .field(
                DRIVER_OVERRIDE.0,
                "driver_override",
                FieldKind::message(driver_override::NAME),
            )
            .field(
                CUSTOM_DETAIL.0,
                "custom_detail",
                FieldKind::repeated(string()),
            )
            .message(driver_override::descriptor())
            .enumeration(
                EnumDescriptor::new("Name")
                    .value("NAME_UNKNOWN", function_name::UNKNOWN)
                    .value("NAME_OTHER", function_name::OTHER)
                    .value("NAME_BLIND_SPOT_WARNING", function_name::BLIND_SPOT_WARNING)
                    .value(
                        "NAME_FORWARD_COLLISION_WARNING",
                        function_name::FORWARD_COLLISION_WARNING,
                    )
                    .value(
                        "NAME_LANE_DEPARTURE_WARNING",
                        function_name::LANE_DEPARTURE_WARNING,
                    )
                    .value(
                        "NAME_ADAPTIVE_CRUISE_CONTROL",
                        function_name::ADAPTIVE_CRUISE_CONTROL,
                    )
                    .value(
                        "NAME_EMERGENCY_BRAKE_ASSIST",
                        function_name::EMERGENCY_BRAKE_ASSIST,
                    )
                    .value("NAME_LANE_KEEPING_ASSIST", function_name::LANE_KEEPING_ASSIST)
                    .value("NAME_AUTOMATED_PARKING", function_name::AUTOMATED_PARKING),
            )
            .enumeration(
                EnumDescriptor::new("State")
                    .value("STATE_UNKNOWN", state::UNKNOWN)
                    .value("STATE_OTHER", state::OTHER)
                    .value("STATE_ERRORED", state::ERRORED)
                    .value("STATE_UNAVAILABLE", state::UNAVAILABLE)
                    .value("STATE_AVAILABLE", state::AVAILABLE)
                    .value("STATE_STANDBY", state::STANDBY)
                    .value("STATE_ACTIVE", state::ACTIVE),
            )
    }
}

pub(crate) fn descriptor() -> MessageDescriptor {
    MessageDescriptor::new(NAME)
        .field(
            VERSION.0,
            "version",
            FieldKind::message(interface_version::NAME),
        )
        .field(TIMESTAMP.0, "timestamp", FieldKind::message(timestamp::NAME))
        .field(
            HOST_VEHICLE_ID.0,
            "host_vehicle_id",
            FieldKind::Scalar(ScalarType::Uint64),
        )
        .field(
            VEHICLE_BASICS.0,
            "vehicle_basics",
            FieldKind::message(vehicle_basics::NAME),
        )
        .field(
            VEHICLE_MOTION.0,
            "vehicle_motion",
            FieldKind::message(vehicle_motion::NAME),
        )
        .field(
            VEHICLE_POWERTRAIN.0,
            "vehicle_powertrain",
            FieldKind::message(vehicle_powertrain::NAME),
        )
        .field(
            VEHICLE_STEERING.0,
            "vehicle_steering",
            FieldKind::message(vehicle_steering::NAME),
        )
        .field(
            VEHICLE_WHEELS.0,
            "vehicle_wheels",
            FieldKind::message(vehicle_wheels::NAME),
        )
        .field(
            VEHICLE_LOCALIZATION.0,
            "vehicle_localization",
            FieldKind::message(vehicle_localization::NAME),
        )
        .field(
            VEHICLE_AUTOMATED_DRIVING_FUNCTION.0,
            "vehicle_automated_driving_function",
            FieldKind::repeated(FieldKind::message(automated_driving_function::NAME)),
        )
        .version_field(VERSION.0)
        .message(vehicle_basics::descriptor())
        .message(vehicle_motion::descriptor())
        .message(vehicle_powertrain::descriptor())
        .message(vehicle_steering::descriptor())
        .message(vehicle_wheels::descriptor())
        .message(vehicle_localization::descriptor())
        .message(automated_driving_function::descriptor())
}
