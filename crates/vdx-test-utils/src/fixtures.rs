//! Reusable vdx record fixtures.
//!
//! Small builders for the leaf messages plus [`sample_host_vehicle_data`],
//! a fully populated `HostVehicleData` that touches every field kind the
//! schema uses: scalars, enums, nested messages, repeated messages,
//! repeated enums and repeated strings.

use vdx_core::{InterfaceVersion, Record, Value};
use vdx_schema::host_vehicle::{
    self, automated_driving_function as adf, vehicle_basics, vehicle_localization,
    vehicle_motion, vehicle_powertrain, vehicle_steering, vehicle_wheels,
};
use vdx_schema::{geodetic_position, interface_version, orientation3d, timestamp as ts, vector3d};

use vdx_schema::host_vehicle::automated_driving_function::driver_override;
use vdx_schema::host_vehicle::vehicle_powertrain::{motor, pedalry as pedals};
use vdx_schema::host_vehicle::vehicle_wheels::wheel_data;

/// A `Pedalry` record; `None` leaves the field absent.
pub fn pedalry(acceleration: Option<f64>, brake: Option<f64>, clutch: Option<f64>) -> Record {
    let mut record = Record::new();
    for (tag, value) in [
        (pedals::PEDAL_POSITION_ACCELERATION, acceleration),
        (pedals::PEDAL_POSITION_BRAKE, brake),
        (pedals::PEDAL_POSITION_CLUTCH, clutch),
    ] {
        if let Some(value) = value {
            record.set(tag, value);
        }
    }
    record
}

pub fn version(version: InterfaceVersion) -> Record {
    Record::new()
        .with(interface_version::VERSION_MAJOR, version.major)
        .with(interface_version::VERSION_MINOR, version.minor)
        .with(interface_version::VERSION_PATCH, version.patch)
}

pub fn timestamp(seconds: i64, nanos: u32) -> Record {
    Record::new()
        .with(ts::SECONDS, seconds)
        .with(ts::NANOS, nanos)
}

pub fn vector(x: f64, y: f64, z: f64) -> Record {
    Record::new()
        .with(vector3d::X, x)
        .with(vector3d::Y, y)
        .with(vector3d::Z, z)
}

pub fn orientation(roll: f64, pitch: f64, yaw: f64) -> Record {
    Record::new()
        .with(orientation3d::ROLL, roll)
        .with(orientation3d::PITCH, pitch)
        .with(orientation3d::YAW, yaw)
}

pub fn geodetic(latitude: f64, longitude: f64, altitude: f64) -> Record {
    Record::new()
        .with(geodetic_position::LATITUDE, latitude)
        .with(geodetic_position::LONGITUDE, longitude)
        .with(geodetic_position::ALTITUDE, altitude)
}

/// A `WheelData` record for wheel `index` on `axle`.
pub fn wheel(axle: u32, index: u32, rotation_rate: f64) -> Record {
    let y = if index == 0 { 0.8 } else { -0.8 };
    Record::new()
        .with(wheel_data::AXLE, axle)
        .with(wheel_data::INDEX, index)
        .with(wheel_data::POSITION, vector(-2.7 * f64::from(axle), y, 0.3))
        .with(wheel_data::ROTATION_RATE, rotation_rate)
        .with(wheel_data::FRICTION_COEFFICIENT, 1.0)
}

/// A `VehicleAutomatedDrivingFunction` record with no driver override.
pub fn automated_driving_function(name: i32, state: i32) -> Record {
    Record::new()
        .with(adf::FUNCTION_NAME, Value::Enum(name))
        .with(adf::STATE, Value::Enum(state))
}

/// A `HostVehicleData` at the schema's interface version with every
/// sub-message populated and a four-wheel `VehicleWheels`.
pub fn sample_host_vehicle_data() -> Record {
    host_vehicle_data_with_wheels(4)
}

/// Like [`sample_host_vehicle_data`] with `wheels` wheel entries, two per
/// axle.
pub fn host_vehicle_data_with_wheels(wheels: u32) -> Record {
    let basics = Record::new()
        .with(vehicle_basics::CURB_WEIGHT, 1_650.0)
        .with(
            vehicle_basics::OPERATING_STATE,
            Value::Enum(vehicle_basics::operating_state::DRIVING),
        );

    let motion = Record::new()
        .with(vehicle_motion::POSITION, vector(120.5, -4.25, 0.0))
        .with(vehicle_motion::ORIENTATION, orientation(0.0, 0.01, 1.57))
        .with(vehicle_motion::VELOCITY, vector(13.9, 0.1, 0.0))
        .with(vehicle_motion::ACCELERATION, vector(0.4, 0.0, 0.0))
        .with(vehicle_motion::CURRENT_CURVATURE, 0.002);

    let mut powertrain = Record::new().with(
        vehicle_powertrain::PEDALRY,
        pedalry(Some(0.5), None, Some(0.0)),
    );
    powertrain.push(
        vehicle_powertrain::MOTOR,
        Record::new()
            .with(motor::TYPE, Value::Enum(motor::motor_type::ELECTRIC))
            .with(motor::RPM, 3_200.0)
            .with(motor::TORQUE, 180.0),
    );

    let steering = Record::new()
        .with(vehicle_steering::STEERING_WHEEL_ANGLE, -0.05)
        .with(vehicle_steering::STEERING_WHEEL_ANGULAR_SPEED, 0.0);

    let mut wheel_list = Record::new();
    for i in 0..wheels {
        wheel_list.push(vehicle_wheels::WHEEL_DATA, wheel(i / 2, i % 2, 41.7));
    }

    let localization = Record::new()
        .with(vehicle_localization::POSITION, vector(120.4, -4.3, 0.0))
        .with(
            vehicle_localization::GEODETIC_POSITION,
            geodetic(48.137_154, 11.576_124, 519.0),
        );

    let mut override_state = Record::new().with(driver_override::ACTIVE, true);
    override_state.push(
        driver_override::OVERRIDE_REASON,
        Value::Enum(driver_override::reason::BRAKE_PEDAL),
    );
    override_state.push(
        driver_override::OVERRIDE_REASON,
        Value::Enum(driver_override::reason::STEERING_INPUT),
    );
    let mut lane_keeping = automated_driving_function(
        adf::function_name::LANE_KEEPING_ASSIST,
        adf::state::STANDBY,
    )
    .with(adf::DRIVER_OVERRIDE, override_state);
    lane_keeping.push(adf::CUSTOM_DETAIL, "left marking lost");

    let mut record = Record::new()
        .with(host_vehicle::VERSION, version(vdx_schema::INTERFACE_VERSION))
        .with(host_vehicle::TIMESTAMP, timestamp(1_700_000_000, 250_000_000))
        .with(host_vehicle::HOST_VEHICLE_ID, 7u64)
        .with(host_vehicle::VEHICLE_BASICS, basics)
        .with(host_vehicle::VEHICLE_MOTION, motion)
        .with(host_vehicle::VEHICLE_POWERTRAIN, powertrain)
        .with(host_vehicle::VEHICLE_STEERING, steering)
        .with(host_vehicle::VEHICLE_LOCALIZATION, localization);
    if wheels > 0 {
        record.set(host_vehicle::VEHICLE_WHEELS, wheel_list);
    }
    record.push(
        host_vehicle::VEHICLE_AUTOMATED_DRIVING_FUNCTION,
        automated_driving_function(
            adf::function_name::ADAPTIVE_CRUISE_CONTROL,
            adf::state::ACTIVE,
        ),
    );
    record.push(host_vehicle::VEHICLE_AUTOMATED_DRIVING_FUNCTION, lane_keeping);
    record
}
