/// An RGB color triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn as_array(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}
