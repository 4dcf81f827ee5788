//! Unit tests for error reporting and recovery

use crate::common::{MockDelay, MockInterface, create_mock_driver};
use crate::common::mock_interface::MockError;
use bno055::{Bno055Driver, Error, OperationMode, Page, Step};
use bno055::ErrorKind;

#[test]
fn test_wrong_chip_id() {
    let interface = MockInterface::new();
    interface.set_chip_id(0x55);

    let result = Bno055Driver::new(interface);

    match result {
        Err(err @ Error::InvalidDevice(0x55)) => {
            assert_eq!(err.kind(), ErrorKind::Precondition);
            assert_eq!(err.step(), None);
        }
        Err(other) => panic!("Expected InvalidDevice, got {:?}", other),
        Ok(_) => panic!("Probe must reject a foreign chip"),
    }
}

#[test]
fn test_probe_read_failure() {
    let interface = MockInterface::new();
    interface.fail_reads_at(Page::Page0, 0x00);

    let err = Bno055Driver::new(interface).err().unwrap();

    assert!(matches!(
        err,
        Error::Io {
            register: 0x00,
            step: Some(Step::Probe),
            source: MockError::Communication,
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_probe_page_select_failure() {
    let interface = MockInterface::new();
    interface.fail_page_switch(true);

    let err = Bno055Driver::new(interface.clone()).err().unwrap();

    assert_eq!(err.step(), Some(Step::SelectPage));
    assert_eq!(err.register(), Some(0x07));
    assert!(
        interface.read_addresses().is_empty(),
        "CHIP_ID is not read when page selection fails"
    );
}

#[test]
fn test_probe_selects_page0() {
    let interface = MockInterface::new();

    let driver = Bno055Driver::new(interface.clone()).unwrap();

    assert_eq!(driver.current_page(), Some(Page::Page0));
    assert_eq!(interface.page_switch_count(), 1);
    assert_eq!(interface.read_addresses(), vec![0x00]);
    assert!(interface.writes().is_empty(), "Probe does not reconfigure");
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();
    assert!(driver.read_quaternion().is_err());

    // The next read goes through
    assert!(driver.read_quaternion().is_ok());
}

#[test]
fn test_error_kinds() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    interface.make_sticky(Page::Page0, 0x3D);
    let err = driver
        .set_operation_mode(OperationMode::Ndof, &mut delay)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Verification);
    assert_eq!(err.step(), None);

    let err = driver
        .load_calibration(&[0u8; 12], &mut delay)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);

    interface.set_register(Page::Page0, 0x3E, 0x03);
    let err = driver.power_mode().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(err.register(), Some(0x3E));
}

#[test]
fn test_transport_conversion() {
    let err: Error<MockError> = MockError::Communication.into();

    assert!(matches!(err, Error::Transport(MockError::Communication)));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.register(), None);
}

#[test]
fn test_innermost_step_wins() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();
    interface.set_mode(0x0C);
    interface.fail_reads_at(Page::Page0, 0x55);

    // The offsets read runs inside a mode change; the read step is reported
    let err = driver.calibration_offsets(&mut delay).unwrap_err();

    assert_eq!(err.step(), Some(Step::ReadOffsets));
    assert_eq!(interface.mode(), 0x0C);
}
