use gloo_console::{error, info};
use leaflet::{Evented, Icon, IconOptions, LatLng, Map, MapOptions, Marker, MarkerOptions, MouseEvent, Point, Popup as LeafletPopup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{closure::Closure, JsValue};
use web_sys::{js_sys::{Object, Reflect}, HtmlElement, Node};
use workout_tracker_lib::{Coordinates, MapAdapter, MarkerIcon, PanOptions, Popup};
use yew::prelude::*;

/// Leaflet map living in `container`.
pub struct LeafletMap {
    map: Map,
    click_handler: Option<Closure<dyn Fn(MouseEvent)>>,
}

impl LeafletMap {
    pub fn new(container: &HtmlElement) -> Self {
        Self {
            map: Map::new_with_element(container, &MapOptions::default()),
            click_handler: None,
        }
    }
}

impl MapAdapter for LeafletMap {
    type Marker = Marker;

    fn create_view(&mut self, center: Coordinates, zoom: f64) {
        self.map.set_view(&lat_lng(center), zoom);
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        let opts = TileLayerOptions::new();
        opts.set_attribution(attribution.to_owned());
        opts.set_update_when_idle(true);
        TileLayer::new_options(url_template, &opts).add_to(&self.map);
    }

    fn on_click(&mut self, handler: Box<dyn Fn(Coordinates)>) {
        let closure = Closure::<dyn Fn(MouseEvent)>::new(move |event: MouseEvent| {
            let position = event.lat_lng();
            handler(Coordinates::new(position.lat(), position.lng()));
        });
        self.map.on("click", closure.as_ref());

        // Leaflet keeps calling into it, so it must live as long as the map
        self.click_handler = Some(closure);
    }

    fn place_marker(&mut self, coordinates: Coordinates, icon: &MarkerIcon) -> Marker {
        let icon_opts = IconOptions::new();
        icon_opts.set_icon_url(icon.url.clone());
        icon_opts.set_icon_size(Point::new(icon.size.0, icon.size.1));

        let marker_opts = MarkerOptions::new();
        marker_opts.set_icon(Icon::new(&icon_opts));

        let marker = Marker::new_with_options(&lat_lng(coordinates), &marker_opts);
        marker.add_to(&self.map);
        marker
    }

    fn bind_popup(&mut self, marker: &Marker, popup: &Popup) {
        let opts = PopupOptions::new();
        opts.set_max_width(popup.max_width);
        opts.set_min_width(popup.min_width);
        opts.set_auto_close(popup.auto_close);
        opts.set_close_on_click(popup.close_on_click);
        opts.set_class_name(popup.class_name.clone());

        let leaflet_popup = LeafletPopup::new(&opts, None);
        leaflet_popup.set_content(&popup.content.as_str().into());

        marker.bind_popup(&leaflet_popup);
        marker.open_popup();
    }

    fn remove_marker(&mut self, marker: Marker) {
        marker.remove();
    }

    fn pan_to(&mut self, coordinates: Coordinates, zoom: f64, options: &PanOptions) {
        let opts = match pan_options(options) {
            Ok(opts) => opts,
            Err(err) => {
                error!(format!("Could not build pan options, panning without animation: {err:?}"));
                Object::new()
            }
        };

        info!(format!("Panning to {}, {}", coordinates.lat, coordinates.lng));
        self.map.set_view_with_options(&lat_lng(coordinates), zoom, &opts);
    }
}

/// `{ animate, pan: { duration } }` as Leaflet's `setView` expects it.
fn pan_options(options: &PanOptions) -> Result<Object, JsValue> {
    let pan = Object::new();
    Reflect::set(&pan, &"duration".into(), &options.duration_secs.into())?;

    let opts = Object::new();
    Reflect::set(&opts, &"animate".into(), &options.animate.into())?;
    Reflect::set(&opts, &"pan".into(), &pan)?;
    Ok(opts)
}

fn lat_lng(coordinates: Coordinates) -> LatLng {
    LatLng::new(coordinates.lat, coordinates.lng)
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub container: HtmlElement,
}

/// Mounts the element Leaflet renders into.
#[function_component]
pub fn MapComponent(props: &Props) -> Html {
    let node: &Node = &props.container.clone().into();

    html! {
        <div id="map" class="map">
            {Html::VRef(node.clone())}
        </div>
    }
}
