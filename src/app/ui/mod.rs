mod controls;
mod details;
mod highlight;
mod list;
mod panels;
mod preview;
