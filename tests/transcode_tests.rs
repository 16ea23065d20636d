//! Image transcoding tests

mod common;

#[cfg(test)]
mod tests {
    use super::common::{sample_bitmap, RED_INDEX};
    use archive_api::transcode::{describe, render_png, to_rgba, ImageFormat};
    use archive_api::types::{Area, Bitmap, Palette};

    fn palette() -> Palette {
        let mut colors: Vec<[u8; 3]> = (0..=255u8).map(|i| [i; 3]).collect();
        colors[RED_INDEX as usize] = [255, 0, 0];
        Palette::from_colors(colors).unwrap()
    }

    // -----------------------------------------------------------------------
    // Describe
    // -----------------------------------------------------------------------

    #[test]
    fn describe_reports_hotspot_and_png() {
        let (hotspot, formats) = describe(&sample_bitmap());
        assert_eq!(
            hotspot,
            Area {
                left: 1,
                top: 0,
                right: 3,
                bottom: 2
            }
        );
        assert_eq!(formats, [ImageFormat::Png]);
        assert_eq!(formats[0].tag(), "png");
        assert_eq!(formats[0].content_type(), "image/png");
    }

    // -----------------------------------------------------------------------
    // Palette mapping
    // -----------------------------------------------------------------------

    #[test]
    fn pixels_map_through_palette() {
        let rgba = to_rgba(&sample_bitmap(), &palette());
        assert_eq!((rgba.width(), rgba.height()), (4, 2));
        assert_eq!(rgba.get_pixel(1, 0).0, [255, 0, 0, 255]);
        assert_eq!(rgba.get_pixel(2, 0).0, [7, 7, 7, 255]);
        assert_eq!(rgba.get_pixel(3, 1).0, [4, 4, 4, 255]);
    }

    #[test]
    fn index_zero_is_transparent() {
        let rgba = to_rgba(&sample_bitmap(), &palette());
        assert_eq!(rgba.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn short_pixel_buffer_reads_as_transparent() {
        let bitmap = Bitmap {
            pixels: vec![RED_INDEX],
            ..Bitmap::blank(2, 2)
        };
        let rgba = to_rgba(&bitmap, &palette());
        assert_eq!(rgba.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(rgba.get_pixel(1, 1).0[3], 0);
    }

    #[test]
    fn palette_requires_256_entries() {
        assert!(Palette::from_colors(vec![[0, 0, 0]; 16]).is_none());
        assert!(Palette::from_colors(vec![[0, 0, 0]; 256]).is_some());
    }

    // -----------------------------------------------------------------------
    // PNG
    // -----------------------------------------------------------------------

    #[test]
    fn png_decodes_back_to_same_pixels() {
        let bitmap = sample_bitmap();
        let png = render_png(&bitmap, &palette()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded, to_rgba(&bitmap, &palette()));
    }
}
