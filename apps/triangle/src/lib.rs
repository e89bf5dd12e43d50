// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Worksheet 1: a resizable window cleared to teal with one orange triangle.

cubefall::cubefall_app!(Triangle);
