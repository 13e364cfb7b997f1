// ============================================================================
// I/O Subsystem Module
// ============================================================================
pub mod audio;
pub mod mmio;
pub mod pci;
