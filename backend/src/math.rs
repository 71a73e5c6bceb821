use bytemuck::{Pod, Zeroable};
use std::ops::{Index, IndexMut};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3 { x, y, z }
    }
}

/// RGBA color or homogeneous position.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
        Vec4 { x, y, z, w }
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[f32; 4] {
        bytemuck::cast_ref(self)
    }
    #[inline(always)]
    pub fn as_array_mut(&mut self) -> &mut [f32; 4] {
        bytemuck::cast_mut(self)
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;
    #[inline(always)]
    fn index(&self, i: usize) -> &f32 {
        self.as_array().index(i)
    }
}

impl IndexMut<usize> for Vec4 {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        self.as_array_mut().index_mut(i)
    }
}
