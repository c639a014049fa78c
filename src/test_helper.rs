//! Helper functions shared by the unit tests.
//!
//! **Note**: This module is only compiled during testing.
