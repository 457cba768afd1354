// Admin commands

pub mod review_course;
