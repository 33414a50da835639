use hostel_test_utils::prelude::*;

use crate::server::{
    error::{hostel::HostelError, Error},
    service::student::StudentService,
};
