pub mod opencv_camera;
