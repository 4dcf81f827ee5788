//! Unit tests for register dumps and system reset

use crate::common::{MockDelay, Operation, create_mock_driver};
use bno055::{Bno055Driver, Page, Step};

#[test]
fn test_dump_both_pages() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();
    interface.set_register(Page::Page0, 0x7F, 0x5A);

    let dump = driver.dump_registers(&mut delay).unwrap();

    assert_eq!(dump.page0[0][0], 0xA0);
    assert_eq!(dump.page0[3][6], 0x0F, "ST_RESULT at 0x36");
    assert_eq!(dump.page0[7][15], 0x5A);
    assert_eq!(dump.page1[0][8], 0x0D, "ACC_CONFIG at page 1 0x08");
    assert_eq!(dump.page1[0][7], 0x01, "PAGE_ID reads back the selected page");

    assert_eq!(delay.delays_ms(), vec![50, 50]);
    assert_eq!(interface.page_switch_count(), 2);
    assert_eq!(interface.current_page(), Page::Page0);
    assert_eq!(driver.current_page(), Some(Page::Page0));
}

#[test]
fn test_dump_reads_rows_of_sixteen() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();

    driver.dump_registers(&mut delay).unwrap();

    let reads: Vec<_> = interface
        .operations()
        .into_iter()
        .filter_map(|op| match op {
            Operation::Read { page, address, len } => Some((page, address, len)),
            _ => None,
        })
        .collect();
    assert_eq!(reads.len(), 16);
    assert!(reads.iter().all(|&(_, _, len)| len == 16));
    assert_eq!(reads[0], (Page::Page0, 0x00, 16));
    assert_eq!(reads[7], (Page::Page0, 0x70, 16));
    assert_eq!(reads[8], (Page::Page1, 0x00, 16));
    assert_eq!(reads[15], (Page::Page1, 0x70, 16));
}

#[test]
fn test_dump_failure_on_page1_restores_page0() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();
    interface.fail_reads_at(Page::Page1, 0x20);

    let err = driver.dump_registers(&mut delay).unwrap_err();

    assert_eq!(err.step(), Some(Step::Dump));
    assert_eq!(err.register(), Some(0x20));
    assert_eq!(interface.current_page(), Page::Page0);
    assert_eq!(delay.delays_ms(), vec![50, 50]);
}

#[test]
fn test_dump_failure_on_page0_stays_on_page0() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();
    interface.fail_reads_at(Page::Page0, 0x30);

    let err = driver.dump_registers(&mut delay).unwrap_err();

    assert_eq!(err.step(), Some(Step::Dump));
    assert_eq!(interface.page_switch_count(), 0);
    assert!(delay.delays_ms().is_empty());
}

#[test]
fn test_reset_returns_interface() {
    let (driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();
    interface.set_mode(0x0C);

    let released = driver.reset(&mut delay).unwrap();

    assert_eq!(interface.reset_count(), 1);
    assert_eq!(interface.writes(), vec![(0x3F, vec![0x20])]);
    assert_eq!(delay.delays_ms(), vec![650]);
    assert_eq!(interface.mode(), 0x00, "Device boots into CONFIG");

    // The released interface can start a new session
    let mut driver = Bno055Driver::new(released).unwrap();
    assert_eq!(driver.identity().unwrap().chip_id, 0xA0);
}

#[test]
fn test_reset_after_page1_access() {
    let (mut driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();
    driver.select_page(Page::Page1).unwrap();

    driver.reset(&mut delay).unwrap();

    // SYS_TRIGGER lives on page 0
    assert!(interface.operations().contains(&Operation::Write {
        page: Page::Page0,
        address: 0x3F,
        data: vec![0x20],
    }));
    assert_eq!(interface.reset_count(), 1);
}

#[test]
fn test_reset_write_failure() {
    let (driver, interface) = create_mock_driver();
    let mut delay = MockDelay::new();
    interface.fail_writes_at(Page::Page0, 0x3F);

    let err = driver.reset(&mut delay).unwrap_err();

    assert_eq!(err.step(), Some(Step::Reset));
    assert_eq!(interface.reset_count(), 0);
    assert!(delay.delays_ms().is_empty());
}
