//! Mock interface implementation for testing the BNO055 driver

use bno055::Page;
use device_driver::RegisterInterface;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// `PAGE_ID`, present on both pages
const PAGE_ID: u8 = 0x07;
/// `OPR_MODE`
const OPR_MODE: u8 = 0x3D;
/// `SYS_TRIGGER`
const SYS_TRIGGER: u8 = 0x3F;

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Burst read
    Read {
        /// Page the read happened on
        page: Page,
        /// First register address
        address: u8,
        /// Number of bytes
        len: usize,
    },
    /// Burst write
    Write {
        /// Page the write happened on
        page: Page,
        /// First register address
        address: u8,
        /// Bytes written
        data: Vec<u8>,
    },
    /// Page switch
    PageSwitch {
        /// Previous page
        from: Page,
        /// New page
        to: Page,
    },
}

/// Shared state for mock interface (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Simulated register values (page, address) -> value
    registers: HashMap<(Page, u8), u8>,

    /// Current page selection
    current_page: Page,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,
    fail_page_switch: bool,
    fail_read_at: HashSet<(Page, u8)>,
    fail_write_at: HashSet<(Page, u8)>,
    fail_write_of: HashSet<(Page, u8, u8)>,

    /// Registers that ignore writes
    sticky: HashSet<(Page, u8)>,

    /// Number of system resets requested through `SYS_TRIGGER`
    resets: usize,
}

impl MockState {
    fn new() -> Self {
        let mut state = Self {
            registers: HashMap::new(),
            current_page: Page::Page0,
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
            fail_page_switch: false,
            fail_read_at: HashSet::new(),
            fail_write_at: HashSet::new(),
            fail_write_of: HashSet::new(),
            sticky: HashSet::new(),
            resets: 0,
        };
        state.power_on();
        state
    }

    /// Power-on register contents
    fn power_on(&mut self) {
        self.registers.clear();
        self.current_page = Page::Page0;

        let identity = [0xA0, 0xFB, 0x32, 0x0F, 0x11, 0x03, 0x15];
        for (address, value) in (0u8..).zip(identity) {
            self.registers.insert((Page::Page0, address), value);
        }
        self.registers.insert((Page::Page0, 0x36), 0x0F); // ST_RESULT all passed
        self.registers.insert((Page::Page0, 0x39), 0x00); // SYS_STATUS idle
        self.registers.insert((Page::Page0, 0x41), 0x24); // AXIS_MAP_CONFIG default
        self.registers.insert((Page::Page0, OPR_MODE), 0x00); // CONFIG

        // Page 1 sensor configuration defaults
        self.registers.insert((Page::Page1, 0x08), 0x0D); // ACC_CONFIG 4G, 62.5 Hz, normal
        self.registers.insert((Page::Page1, 0x09), 0x0B); // MAG_CONFIG 10 Hz, regular, normal
        self.registers.insert((Page::Page1, 0x0A), 0x38); // GYR_CONFIG_0 2000 dps, 32 Hz
        self.registers.insert((Page::Page1, 0x0B), 0x00); // GYR_CONFIG_1 normal
    }

    fn page_value(&self, address: u8) -> u8 {
        self.registers
            .get(&(self.current_page, address))
            .copied()
            .unwrap_or(0)
    }
}

/// Mock interface for testing
#[derive(Clone, Debug)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    /// Create a new mock interface with power-on register values
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Set a register value
    #[allow(dead_code)]
    pub fn set_register(&self, page: Page, address: u8, value: u8) {
        self.state
            .borrow_mut()
            .registers
            .insert((page, address), value);
    }

    /// Get a register value
    #[allow(dead_code)]
    pub fn get_register(&self, page: Page, address: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&(page, address))
            .copied()
            .unwrap_or(0)
    }

    /// Fill consecutive page 0 registers
    #[allow(dead_code)]
    pub fn set_block(&self, address: u8, bytes: &[u8]) {
        for (offset, &value) in (0u8..).zip(bytes) {
            self.set_register(Page::Page0, address + offset, value);
        }
    }

    /// Read consecutive page 0 registers
    #[allow(dead_code)]
    pub fn get_block(&self, address: u8, len: usize) -> Vec<u8> {
        (0..len as u8)
            .map(|offset| self.get_register(Page::Page0, address + offset))
            .collect()
    }

    /// Store little-endian `i16` values starting at `address` on page 0
    #[allow(dead_code)]
    pub fn set_words(&self, address: u8, words: &[i16]) {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.set_block(address, &bytes);
    }

    /// Set `CHIP_ID`
    #[allow(dead_code)]
    pub fn set_chip_id(&self, value: u8) {
        self.set_register(Page::Page0, 0x00, value);
    }

    /// Set the raw `OPR_MODE` value
    #[allow(dead_code)]
    pub fn set_mode(&self, code: u8) {
        self.set_register(Page::Page0, OPR_MODE, code);
    }

    /// Raw `OPR_MODE` value
    #[allow(dead_code)]
    pub fn mode(&self) -> u8 {
        self.get_register(Page::Page0, OPR_MODE)
    }

    /// Currently selected page
    #[allow(dead_code)]
    pub fn current_page(&self) -> Page {
        self.state.borrow().current_page
    }

    /// Inject a read failure on the next read operation
    #[allow(dead_code)]
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    #[allow(dead_code)]
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Fail every read starting at `address` on `page`
    #[allow(dead_code)]
    pub fn fail_reads_at(&self, page: Page, address: u8) {
        self.state.borrow_mut().fail_read_at.insert((page, address));
    }

    /// Fail every write starting at `address` on `page`
    #[allow(dead_code)]
    pub fn fail_writes_at(&self, page: Page, address: u8) {
        self.state
            .borrow_mut()
            .fail_write_at
            .insert((page, address));
    }

    /// Fail every write of `value` to `address` on `page`
    #[allow(dead_code)]
    pub fn fail_writes_of(&self, page: Page, address: u8, value: u8) {
        self.state
            .borrow_mut()
            .fail_write_of
            .insert((page, address, value));
    }

    /// Inject a page switch failure
    #[allow(dead_code)]
    pub fn fail_page_switch(&self, enable: bool) {
        self.state.borrow_mut().fail_page_switch = enable;
    }

    /// Make a register ignore writes
    #[allow(dead_code)]
    pub fn make_sticky(&self, page: Page, address: u8) {
        self.state.borrow_mut().sticky.insert((page, address));
    }

    /// Number of resets requested
    #[allow(dead_code)]
    pub fn reset_count(&self) -> usize {
        self.state.borrow().resets
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Count page switch operations
    #[allow(dead_code)]
    pub fn page_switch_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, Operation::PageSwitch { .. }))
            .count()
    }

    /// All writes (page switches excluded)
    #[allow(dead_code)]
    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                Operation::Write { address, data, .. } => Some((address, data)),
                _ => None,
            })
            .collect()
    }

    /// Values written to `OPR_MODE`, in order
    #[allow(dead_code)]
    pub fn mode_writes(&self) -> Vec<u8> {
        self.writes()
            .into_iter()
            .filter(|(address, _)| *address == OPR_MODE)
            .map(|(_, data)| data[0])
            .collect()
    }

    /// Start addresses of all reads, in order
    #[allow(dead_code)]
    pub fn read_addresses(&self) -> Vec<u8> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                Operation::Read { address, .. } => Some(address),
                _ => None,
            })
            .collect()
    }
}

/// Mock error type
#[derive(Debug, Clone, PartialEq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
    /// Simulated page switch error
    PageSwitch,
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }
        let page = state.current_page;
        if state.fail_read_at.contains(&(page, address)) {
            return Err(MockError::Communication);
        }

        for (offset, byte) in (0u8..).zip(read_data.iter_mut()) {
            let reg_addr = address.wrapping_add(offset);
            *byte = if reg_addr == PAGE_ID {
                page as u8
            } else {
                state.page_value(reg_addr)
            };
        }

        state.operations.push(Operation::Read {
            page,
            address,
            len: read_data.len(),
        });

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }

        // Handle page select register specially
        if address == PAGE_ID {
            if state.fail_page_switch {
                return Err(MockError::PageSwitch);
            }
            let new_page = match write_data[0] {
                0 => Page::Page0,
                1 => Page::Page1,
                _ => return Err(MockError::PageSwitch),
            };

            let old_page = state.current_page;
            state.current_page = new_page;
            state.operations.push(Operation::PageSwitch {
                from: old_page,
                to: new_page,
            });
            return Ok(());
        }

        let page = state.current_page;
        if state.fail_write_at.contains(&(page, address))
            || state
                .fail_write_of
                .contains(&(page, address, write_data[0]))
        {
            return Err(MockError::Communication);
        }

        state.operations.push(Operation::Write {
            page,
            address,
            data: write_data.to_vec(),
        });

        if page == Page::Page0 && address == SYS_TRIGGER && write_data[0] & 0x20 != 0 {
            state.resets += 1;
            state.power_on();
            return Ok(());
        }

        for (offset, &byte) in (0u8..).zip(write_data) {
            let key = (page, address.wrapping_add(offset));
            if !state.sticky.contains(&key) {
                state.registers.insert(key, byte);
            }
        }

        Ok(())
    }
}

impl Default for MockInterface {
    fn default() -> Self {
        Self::new()
    }
}
