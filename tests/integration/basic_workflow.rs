//! Integration tests for basic workflow scenarios

use crate::common::{MockDelay, assert_float_eq, create_mock_driver};
use bno055::{
    Bno055Driver, CALIB_BYTECOUNT, CalibrationBlob, OperationMode, Page, PowerMode,
    SystemStatus,
};

#[test]
fn test_calibrate_persist_and_restore() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    // Probe and inspect
    let info = driver.device_info().unwrap();
    assert_eq!(info.identity.chip_id, 0xA0);
    assert_eq!(info.operation_mode, OperationMode::Config);
    assert!(info.self_test.all_passed());

    // Start fusion and wait for calibration
    driver
        .set_operation_mode(OperationMode::Ndof, &mut delay)
        .unwrap();
    interface.set_register(Page::Page0, 0x39, 0x05);
    interface.set_register(Page::Page0, 0x35, 0xFF);
    assert_eq!(driver.system_status().unwrap(), SystemStatus::FusionRunning);
    assert!(driver.calibration_status().unwrap().is_fully_calibrated());

    // The device learned some offsets
    let learned: Vec<u8> = (0..CALIB_BYTECOUNT as u8).map(|i| i.wrapping_mul(7)).collect();
    interface.set_block(0x43, &learned);

    let blob = driver.save_calibration(&mut delay).unwrap();
    assert_eq!(blob.as_bytes().as_slice(), learned.as_slice());
    assert_eq!(driver.operation_mode().unwrap(), OperationMode::Ndof);

    // A reset wipes the learned offsets
    let bus = driver.reset(&mut delay).unwrap();
    assert_eq!(interface.get_block(0x43, CALIB_BYTECOUNT), vec![0; CALIB_BYTECOUNT]);

    // New session, restore from the persisted bytes
    let stored = *blob.as_bytes();
    let mut driver = Bno055Driver::new(bus).unwrap();
    delay.clear();
    driver.load_calibration(&stored, &mut delay).unwrap();
    assert_eq!(interface.get_block(0x43, CALIB_BYTECOUNT), learned);
    assert_eq!(
        delay.delays_ms(),
        vec![50, 650],
        "Already in CONFIG, only the load settle and reconvergence remain"
    );

    driver
        .set_operation_mode(OperationMode::Ndof, &mut delay)
        .unwrap();

    let offsets = driver.calibration_offsets(&mut delay).unwrap();
    let expected = CalibrationBlob::try_from(learned.as_slice())
        .unwrap()
        .offsets();
    assert_eq!(offsets, expected);
    assert_eq!(driver.operation_mode().unwrap(), OperationMode::Ndof);
}

#[test]
fn test_read_fused_orientation() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    driver
        .set_operation_mode(OperationMode::Ndof, &mut delay)
        .unwrap();

    interface.set_words(0x1A, &[1440, 0, -160]);
    interface.set_words(0x20, &[11585, 0, 0, 11585]);
    interface.set_words(0x2E, &[0, 0, 981]);

    let euler = driver.read_euler().unwrap();
    assert_float_eq(euler.heading, 90.0, 1e-4);
    assert_float_eq(euler.pitch, -10.0, 1e-4);

    let q = driver.read_quaternion().unwrap();
    assert_float_eq(q.norm(), 1.0, 1e-3);

    let gravity = driver.read_gravity().unwrap();
    assert_float_eq(gravity.magnitude(), 9.81, 1e-4);

    assert_eq!(interface.current_page(), Page::Page0);
}

#[test]
fn test_low_power_session() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    driver
        .set_operation_mode(OperationMode::AccGyro, &mut delay)
        .unwrap();
    driver.set_power_mode(PowerMode::Low, &mut delay).unwrap();

    assert_eq!(driver.power_mode().unwrap(), PowerMode::Low);
    assert_eq!(driver.operation_mode().unwrap(), OperationMode::AccGyro);

    // Page 1 reads in between do not disturb the session
    let gyro = driver.gyro_config().unwrap();
    assert_eq!(gyro.range, bno055::sensors::GyroRange::Dps2000);
    assert_eq!(interface.current_page(), Page::Page0);
    assert_eq!(driver.power_mode().unwrap(), PowerMode::Low);
}
