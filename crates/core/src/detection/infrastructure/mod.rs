pub mod haar_cascade_detector;
